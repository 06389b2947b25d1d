//! Reference operations over `exampletable1`
//!
//! ```sql
//! CREATE TABLE exampletable1 (
//!     Id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     ExampleString VARCHAR(35),
//!     ExampleNumber DOUBLE,
//!     ExampleArray TEXT,
//!     DateCreated DATETIME,
//!     Deleted TINYINT,
//!     DeletedAt DATETIME
//! );
//! ```

use chrono::Local;

use crate::context::AppContext;
use crate::persistence::ResultShape;
use crate::router::{Args, CallResult, Discipline, OperationDescriptor, ParamKind, ParamShape};
use crate::wire::WireValue;

pub const TABLE: &str = "exampletable1";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::value(
            "Example",
            "Create",
            ParamShape::WholeArray,
            Discipline::Synchronous,
            create,
        ),
        OperationDescriptor::value(
            "Example",
            "GetAll",
            ParamShape::none(),
            Discipline::Synchronous,
            get_all,
        ),
        OperationDescriptor::value(
            "Example",
            "GetSingle",
            ParamShape::one(ParamKind::Integer),
            Discipline::Synchronous,
            get_single,
        ),
        OperationDescriptor::void(
            "Example",
            "Update",
            ParamShape::WholeArray,
            Discipline::FireAndForget,
            update,
        ),
        OperationDescriptor::value(
            "Example",
            "Delete",
            ParamShape::one(ParamKind::Integer),
            Discipline::Synchronous,
            delete,
        ),
        OperationDescriptor::value(
            "Example",
            "SoftDelete",
            ParamShape::one(ParamKind::Integer),
            Discipline::Synchronous,
            soft_delete,
        ),
        OperationDescriptor::value(
            "Example",
            "Strings",
            ParamShape::none(),
            Discipline::Tracked,
            strings,
        ),
    ]
}

fn now() -> WireValue {
    WireValue::String(Local::now().format(TIMESTAMP_FORMAT).to_string())
}

/// `[ExampleString, ExampleNumber, ExampleArray]` -> new Id
fn create(context: &AppContext, args: Args) -> CallResult<WireValue> {
    let mut values = args.into_array()?;
    values.push(now());
    Ok(context.database.insert(TABLE, &values)?)
}

fn get_all(context: &AppContext, _args: Args) -> CallResult<WireValue> {
    Ok(context
        .database
        .read(TABLE, "*", "*", Vec::new(), ResultShape::ForceMultiDimension)?)
}

fn get_single(context: &AppContext, args: Args) -> CallResult<WireValue> {
    let id = args.get(0)?.clone();
    Ok(context
        .database
        .read(TABLE, "*", "\"Id\" = ?1", vec![id], ResultShape::None)?)
}

/// `[Id, ExampleString, ExampleNumber, ExampleArray, DateCreated]`;
/// `nil` leaves a column unchanged
fn update(context: &AppContext, args: Args) -> CallResult<()> {
    let values = args.into_array()?;
    context.database.update(TABLE, &values)?;
    Ok(())
}

/// Hard delete; returns the number of rows removed
fn delete(context: &AppContext, args: Args) -> CallResult<WireValue> {
    let id = args.get(0)?.clone();
    let removed = context
        .database
        .write_raw("DELETE FROM \"exampletable1\" WHERE \"Id\" = ?1", &[id])?;
    Ok(WireValue::from(removed))
}

/// Marks a row deleted; returns the number of rows marked
fn soft_delete(context: &AppContext, args: Args) -> CallResult<WireValue> {
    let id = args.get(0)?.clone();
    let marked = context.database.write_raw(
        "UPDATE \"exampletable1\" SET \"Deleted\" = 1, \"DeletedAt\" = ?1 WHERE \"Id\" = ?2",
        &[now(), id],
    )?;
    Ok(WireValue::from(marked))
}

/// Every live `ExampleString`, flattened
fn strings(context: &AppContext, _args: Args) -> CallResult<WireValue> {
    Ok(context.database.read(
        TABLE,
        "\"ExampleString\"",
        "*",
        Vec::new(),
        ResultShape::MultiToSingle,
    )?)
}
