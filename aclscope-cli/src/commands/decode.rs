use aclscope::rights::{decode, AccessMask};
use anyhow::Context;
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    output::{emit, print_rows, Report, TableRow},
};

#[derive(Debug, Serialize)]
struct RightEntry {
    name: String,
    bit: String,
    explicit: bool,
}

impl TableRow for RightEntry {
    const HEADERS: &'static [&'static str] = &["Right", "Bit", "Source"];
    const MASK_COLUMNS: &'static [usize] = &[1];

    fn cells(&self) -> Vec<String> {
        let source = if self.explicit { "set" } else { "generic" };
        vec![self.name.clone(), self.bit.clone(), source.to_string()]
    }
}

#[derive(Debug, Serialize)]
struct DecodeOutput {
    mask: String,
    permission_set: String,
    full_control: bool,
    rights: Vec<RightEntry>,
}

impl Report for DecodeOutput {
    fn render(&self) {
        println!("Mask:           {}", self.mask);
        println!("Permission set: {}", self.permission_set);
        println!("Full control:   {}", self.full_control);
        print_rows("Rights:", &self.rights);
    }
}

pub fn run(mask: &str, opts: &GlobalOptions) -> anyhow::Result<()> {
    let mask = AccessMask::parse(mask).with_context(|| format!("failed to parse mask '{mask}'"))?;
    let decoded = decode(mask);
    let explicit = decoded.explicit_rights();

    let output = DecodeOutput {
        mask: decoded.mask().to_string(),
        permission_set: decoded.permission_set().label().to_string(),
        full_control: decoded.full_control(),
        rights: decoded
            .rights()
            .iter()
            .map(|right| RightEntry {
                name: right.name().to_string(),
                bit: AccessMask::from(right.bit()).to_string(),
                explicit: explicit.contains(right),
            })
            .collect(),
    };

    emit(&output, opts)
}
