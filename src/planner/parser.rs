use crate::{
    planner::{
        error::ParseError,
        types::{Command, MetaCommand, Statement},
    },
    types::row::Row,
};

/// Classifies REPL lines into meta commands and statements.
///
/// Keywords are case-insensitive. `insert` takes exactly three arguments:
/// `insert <id> <username> <email>`.
#[derive(Debug, Default)]
pub struct CommandParser;

impl CommandParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, input: &str) -> Result<Command, ParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Command::Empty);
        }

        if let Some(meta) = self.parse_meta(input) {
            return Ok(Command::Meta(meta));
        }

        self.parse_statement(input).map(Command::Statement)
    }

    fn parse_meta(&self, input: &str) -> Option<MetaCommand> {
        match input.to_lowercase().as_str() {
            "exit" | ".exit" | "quit" | "q" => Some(MetaCommand::Exit),
            "help" | "h" => Some(MetaCommand::Help),
            "clear" => Some(MetaCommand::Clear),
            "count" => Some(MetaCommand::Count),
            _ => None,
        }
    }

    fn parse_statement(&self, input: &str) -> Result<Statement, ParseError> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let keyword = tokens[0].to_lowercase();

        match keyword.as_str() {
            "insert" => self.parse_insert(input, &tokens),
            "select" => {
                self.expect_no_arguments(input, &tokens)?;
                Ok(Statement::Select)
            }
            "save" => {
                self.expect_no_arguments(input, &tokens)?;
                Ok(Statement::Save)
            }
            _ => Err(ParseError::UnrecognizedStatement(input.to_string())),
        }
    }

    fn parse_insert(&self, input: &str, tokens: &[&str]) -> Result<Statement, ParseError> {
        let [_, id, username, email] = tokens else {
            return Err(ParseError::SyntaxError(format!(
                "expected 'insert <id> <username> <email>', got '{input}'"
            )));
        };

        let id = self.parse_id(id)?;
        let row = Row::new(id, *username, *email)?;
        Ok(Statement::Insert(row))
    }

    fn parse_id(&self, token: &str) -> Result<u32, ParseError> {
        match token.parse::<u32>() {
            Ok(id) => Ok(id),
            Err(_) if token.parse::<i64>().is_ok_and(|id| id < 0) => {
                Err(ParseError::NegativeId(token.to_string()))
            }
            Err(_) => Err(ParseError::InvalidId(token.to_string())),
        }
    }

    fn expect_no_arguments(&self, input: &str, tokens: &[&str]) -> Result<(), ParseError> {
        if tokens.len() != 1 {
            return Err(ParseError::SyntaxError(format!(
                "'{}' takes no arguments, got '{input}'",
                tokens[0]
            )));
        }
        Ok(())
    }
}
