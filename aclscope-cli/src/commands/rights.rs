use aclscope::rights::{AccessMask, NamedRight, PermissionSet};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::{
    app::GlobalOptions,
    output::{emit, print_rows, Report, TableRow},
};

#[derive(Debug, Serialize)]
struct RightRow {
    name: String,
    bit: String,
}

impl TableRow for RightRow {
    const HEADERS: &'static [&'static str] = &["Right", "Bit"];
    const MASK_COLUMNS: &'static [usize] = &[1];

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.bit.clone()]
    }
}

#[derive(Debug, Serialize)]
struct CombinationRow {
    label: String,
    mask: Option<String>,
}

impl TableRow for CombinationRow {
    const HEADERS: &'static [&'static str] = &["Label", "Requires"];
    const MASK_COLUMNS: &'static [usize] = &[1];

    fn cells(&self) -> Vec<String> {
        let mask = self.mask.as_deref().unwrap_or("-");
        vec![self.label.clone(), mask.to_string()]
    }
}

#[derive(Debug, Serialize)]
struct RightsOutput {
    rights: Vec<RightRow>,
    permission_sets: Vec<CombinationRow>,
}

impl Report for RightsOutput {
    fn render(&self) {
        print_rows("Named rights:", &self.rights);
        println!();
        print_rows(
            "Permission sets (highest priority first):",
            &self.permission_sets,
        );
    }
}

pub fn run(opts: &GlobalOptions) -> anyhow::Result<()> {
    let output = RightsOutput {
        rights: NamedRight::iter()
            .map(|right| RightRow {
                name: right.name().to_string(),
                bit: AccessMask::from(right.bit()).to_string(),
            })
            .collect(),
        permission_sets: PermissionSet::iter()
            .map(|set| CombinationRow {
                label: set.label().to_string(),
                mask: set
                    .combination()
                    .map(|bits| AccessMask::from(bits).to_string()),
            })
            .collect(),
    };

    emit(&output, opts)
}
