//! # Logs Command
//!
//! Create or inspect the guild's audit channel. Restricted to members with
//! Manage Channels.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::permissions::Permissions;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_logs_command()]
}

fn create_logs_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("logs")
        .description("Create or get info about the logs channel")
        .default_member_permissions(Permissions::MANAGE_CHANNELS)
        .dm_permission(false);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_logs_command() {
        let commands = create_commands();
        assert_eq!(commands.len(), 1);

        let logs = &commands[0];
        let name = logs.0.get("name").unwrap().as_str().unwrap();
        assert_eq!(name, "logs");
    }
}
