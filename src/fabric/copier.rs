use log::info;

use super::runner::CommandRunner;
use crate::error::Result;

/// Fabric item types this tool copies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    SemanticModel,
    Report,
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::SemanticModel => f.write_str("SemanticModel"),
            ItemType::Report => f.write_str("Report"),
        }
    }
}

/// Fabric CLI path of an item: `<workspace>.Workspace/<name>.<type>`
pub fn item_path(workspace: &str, name: &str, item_type: ItemType) -> String {
    format!("{}.Workspace/{}.{}", workspace, name, item_type)
}

/// Copies items between workspaces with `fab cp`
pub struct ItemCopier<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    overwrite: bool,
}

impl<'a, R: CommandRunner + ?Sized> ItemCopier<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self {
            runner,
            overwrite: true,
        }
    }

    /// Whether an existing destination item is replaced (`-f`)
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn copy_args(
        &self,
        source_workspace: &str,
        item_name: &str,
        item_type: ItemType,
        target_workspace: &str,
        new_name: &str,
    ) -> Vec<String> {
        let mut args = vec![
            "cp".to_string(),
            item_path(source_workspace, item_name, item_type),
            item_path(target_workspace, new_name, item_type),
        ];
        if self.overwrite {
            args.push("-f".to_string());
        }
        args
    }

    pub async fn copy(
        &self,
        source_workspace: &str,
        item_name: &str,
        item_type: ItemType,
        target_workspace: &str,
        new_name: &str,
    ) -> Result<()> {
        let args = self.copy_args(source_workspace, item_name, item_type, target_workspace, new_name);
        info!("Copying '{}' → '{}'...", args[1], args[2]);

        self.runner.run(&args).await?;
        Ok(())
    }
}
