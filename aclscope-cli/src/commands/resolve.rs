use aclscope::path::{resolve, SecurityObjectPath};
use anyhow::Context;
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    output::{emit, Report},
};

#[derive(Debug, Serialize)]
struct ResolveOutput {
    namespace: &'static str,
    hive: Option<String>,
    subpath: Option<String>,
    canonical: String,
}

impl Report for ResolveOutput {
    fn render(&self) {
        println!("Namespace: {}", self.namespace);
        if let (Some(hive), Some(subpath)) = (&self.hive, &self.subpath) {
            println!("Hive:      {hive}");
            println!("Subpath:   {subpath}");
        }
        println!("Canonical: {}", self.canonical);
    }
}

pub fn run(path: &str, opts: &GlobalOptions) -> anyhow::Result<()> {
    let resolved = resolve(path).with_context(|| format!("failed to resolve '{path}'"))?;
    log::debug!("Resolved '{}' to {:?}", path, resolved);

    let output = match &resolved {
        SecurityObjectPath::RegistryHive { hive, subpath } => ResolveOutput {
            namespace: "registry",
            hive: Some(hive.long_name().to_string()),
            subpath: Some(subpath.clone()),
            canonical: resolved.to_string(),
        },
        SecurityObjectPath::Filesystem(_) => ResolveOutput {
            namespace: "filesystem",
            hive: None,
            subpath: None,
            canonical: resolved.to_string(),
        },
    };

    emit(&output, opts)
}
