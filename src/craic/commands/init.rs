use crate::commands::{CmdMessage, CmdResult, CraicPaths};
use crate::config::CraicConfig;
use crate::error::Result;
use crate::model::Scope;
use std::fs;

pub fn run(paths: &CraicPaths, scope: Scope) -> Result<CmdResult> {
    let dir = paths.scope_dir(scope)?;
    fs::create_dir_all(&dir)?;
    if !CraicConfig::exists(&dir) {
        CraicConfig::default().save(&dir)?;
    }
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialized craic store at {}",
        dir.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_dir_and_default_config_once() {
        let temp = TempDir::new().unwrap();
        let paths = CraicPaths {
            project: Some(temp.path().join(".craic")),
            global: temp.path().join("global"),
        };
        let dir = paths.project.clone().unwrap();

        run(&paths, Scope::Project).unwrap();
        assert!(CraicConfig::exists(&dir));

        let mut custom = CraicConfig::default();
        custom.documents_key = "kept".into();
        custom.save(&dir).unwrap();

        let result = run(&paths, Scope::Project).unwrap();
        assert!(result.messages[0].content.contains("Initialized"));
        assert_eq!(CraicConfig::load(&dir).unwrap().documents_key, "kept");
    }
}
