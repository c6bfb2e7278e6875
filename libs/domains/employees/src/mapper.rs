//! Decoding of upstream employee records.
//!
//! Every field of an [`EmployeeRecord`] is optional at the serde level so a
//! missing field is reported by name instead of as a generic parse error.
//! Mapping is all-or-nothing: one bad record fails the whole batch.

use serde::Deserialize;
use serde_json::Number;
use uuid::Uuid;

use crate::error::{EmployeeError, EmployeeResult};
use crate::models::Employee;

/// Raw employee record as returned by the upstream service
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeRecord {
    pub id: Option<String>,
    pub employee_name: Option<String>,
    pub employee_salary: Option<Number>,
    pub employee_age: Option<Number>,
    pub employee_title: Option<String>,
    pub employee_email: Option<String>,
}

impl TryFrom<EmployeeRecord> for Employee {
    type Error = EmployeeError;

    fn try_from(record: EmployeeRecord) -> Result<Self, Self::Error> {
        let raw_id = required(record.id, "id")?;
        let id = Uuid::parse_str(&raw_id)
            .map_err(|e| EmployeeError::Decode(format!("field 'id' is not a UUID ({raw_id}): {e}")))?;

        let age = to_u32(required(record.employee_age, "employee_age")?, "employee_age")?;

        Ok(Employee {
            id,
            name: required(record.employee_name, "employee_name")?,
            salary: to_u32(required(record.employee_salary, "employee_salary")?, "employee_salary")?,
            age: positive(age, "employee_age")?,
            title: required(record.employee_title, "employee_title")?,
            email: required(record.employee_email, "employee_email")?,
        })
    }
}

/// Map a batch of records, failing on the first malformed one
pub fn map_records(records: Vec<EmployeeRecord>) -> EmployeeResult<Vec<Employee>> {
    records.into_iter().map(Employee::try_from).collect()
}

fn required<T>(value: Option<T>, field: &str) -> EmployeeResult<T> {
    value.ok_or_else(|| EmployeeError::Decode(format!("missing field '{field}'")))
}

fn positive(value: u32, field: &str) -> EmployeeResult<u32> {
    if value == 0 {
        return Err(EmployeeError::Decode(format!("field '{field}' must be positive")));
    }
    Ok(value)
}

/// Coerce a JSON number to u32. Fractions are truncated toward zero.
fn to_u32(number: Number, field: &str) -> EmployeeResult<u32> {
    let out_of_range =
        || EmployeeError::Decode(format!("field '{field}' out of range: {number}"));

    if let Some(value) = number.as_u64() {
        return u32::try_from(value).map_err(|_| out_of_range());
    }
    if number.as_i64().is_some() {
        return Err(out_of_range());
    }

    match number.as_f64() {
        Some(value) if value.is_finite() && value >= 0.0 && value.trunc() <= u32::MAX as f64 => {
            Ok(value.trunc() as u32)
        }
        _ => Err(out_of_range()),
    }
}
