use crate::{
    planner::types::Statement,
    storage::table::Table,
    types::{error::DatabaseError, row::Row},
};

#[derive(Debug, PartialEq)]
pub enum ExecuteResult {
    Inserted,
    Selected(Vec<Row>),
    Saved,
}

/// Runs a parsed statement against `table`. Presentation is left to the
/// caller.
pub fn execute(statement: &Statement, table: &mut Table) -> Result<ExecuteResult, DatabaseError> {
    match statement {
        Statement::Insert(row) => {
            table.insert(row)?;
            Ok(ExecuteResult::Inserted)
        }
        Statement::Select => Ok(ExecuteResult::Selected(table.scan()?)),
        Statement::Save => {
            table.save()?;
            Ok(ExecuteResult::Saved)
        }
    }
}
