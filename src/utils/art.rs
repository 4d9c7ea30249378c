use crate::types::{PAGE_SIZE, ROW_SIZE, TABLE_MAX_ROWS};

pub fn welcome_message(name: &str) -> String {
    let rule = "=".repeat(name.len() + 8);
    format!(
        "{rule}\n    {name}\n{rule}\n\
         users(id, username, email): {TABLE_MAX_ROWS} rows max, \
         {ROW_SIZE}-byte rows, {PAGE_SIZE}-byte pages\n\
         Type 'help' for commands."
    )
}

pub fn help_message() -> &'static str {
    r#"
Available commands:
  insert <id> <username> <email>  - Append a row
  select                          - List all rows
  save                            - Write pending rows to disk
  count                           - Show the number of rows
  help, h                         - Show this help message
  clear                           - Clear the screen
  exit, .exit, quit, q            - Save and exit
"#
}
