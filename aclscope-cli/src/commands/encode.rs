use aclscope::{
    rights::{decode, NamedRight},
    rule::encode,
};
use anyhow::Context;
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    output::{emit, Report},
};

#[derive(Debug, Serialize)]
struct EncodeOutput {
    rights: Vec<String>,
    mask: String,
    permission_set: String,
}

impl Report for EncodeOutput {
    fn render(&self) {
        println!("Mask:           {}", self.mask);
        println!("Permission set: {}", self.permission_set);
        println!("Rights:         {}", self.rights.join(", "));
    }
}

pub fn run(names: &[String], opts: &GlobalOptions) -> anyhow::Result<()> {
    let rights = names
        .iter()
        .map(|name| NamedRight::parse(name).with_context(|| format!("unknown right '{name}'")))
        .collect::<anyhow::Result<Vec<NamedRight>>>()?;

    let mask = encode(rights.iter().copied());
    let decoded = decode(mask);
    let output = EncodeOutput {
        rights: decoded
            .rights()
            .iter()
            .map(|right| right.name().to_string())
            .collect(),
        mask: mask.to_string(),
        permission_set: decoded.permission_set().label().to_string(),
    };

    emit(&output, opts)
}
