use crate::commands::{CmdMessage, CmdResult, CraicPaths};
use crate::config::CraicConfig;
use crate::error::Result;
use crate::model::Scope;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &CraicPaths, scope: Scope, action: ConfigAction) -> Result<CmdResult> {
    let dir = paths.scope_dir(scope)?;
    match action {
        ConfigAction::ShowAll => {
            let config = CraicConfig::load(&dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = CraicConfig::load(&dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = CraicConfig::load(&dir)?;
            if let Err(e) = config.set(&key, &value) {
                return Ok(CmdResult::default().with_message(CmdMessage::error(e)));
            }
            config.save(&dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            Ok(CmdResult::default()
                .with_config(config)
                .with_message(CmdMessage::success(format!(
                    "{} set to {}",
                    key, display_val
                ))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(temp: &TempDir) -> CraicPaths {
        CraicPaths {
            project: Some(temp.path().join(".craic")),
            global: temp.path().join("global"),
        }
    }

    #[test]
    fn show_all_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let result = run(&paths(&temp), Scope::Project, ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(CraicConfig::default()));
    }

    #[test]
    fn set_persists_per_scope() {
        let temp = TempDir::new().unwrap();
        let paths = paths(&temp);

        let result = run(
            &paths,
            Scope::Global,
            ConfigAction::Set("accepted-extensions".into(), "md".into()),
        )
        .unwrap();
        assert!(result.messages[0].content.contains("accepted-extensions set to .md"));

        let global = CraicConfig::load(&paths.global).unwrap();
        assert_eq!(global.accepted_extensions, vec![".md"]);
        let project = CraicConfig::load(paths.project.as_ref().unwrap()).unwrap();
        assert_eq!(project, CraicConfig::default());
    }

    #[test]
    fn unknown_key_is_reported_not_saved() {
        let temp = TempDir::new().unwrap();
        let paths = paths(&temp);

        let result = run(
            &paths,
            Scope::Project,
            ConfigAction::Set("colour".into(), "blue".into()),
        )
        .unwrap();
        assert!(result.has_errors());
        assert!(!CraicConfig::exists(paths.project.as_ref().unwrap()));

        let shown = run(&paths, Scope::Project, ConfigAction::ShowKey("colour".into())).unwrap();
        assert!(shown.has_errors());
    }
}
