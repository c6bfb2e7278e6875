//! Read-side computations over a fetched employee list.
//!
//! All functions borrow the input and never reorder or modify it.

use crate::models::Employee;

/// Number of names returned by [`top_earner_names`]
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Employees whose name contains `fragment`, ignoring case.
///
/// An empty fragment matches everyone. Upstream order is preserved.
pub fn search_by_name(employees: &[Employee], fragment: &str) -> Vec<Employee> {
    let needle = fragment.to_lowercase();

    employees
        .iter()
        .filter(|employee| employee.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Highest salary in the list, or 0 when empty
pub fn max_salary(employees: &[Employee]) -> u32 {
    employees
        .iter()
        .map(|employee| employee.salary)
        .max()
        .unwrap_or(0)
}

/// Names of the ten best-paid employees, highest salary first.
///
/// Equal salaries keep their upstream order (`sort_by` is stable).
pub fn top_earner_names(employees: &[Employee]) -> Vec<String> {
    let mut ranked: Vec<&Employee> = employees.iter().collect();
    ranked.sort_by(|a, b| b.salary.cmp(&a.salary));

    ranked
        .into_iter()
        .take(TOP_EARNERS_LIMIT)
        .map(|employee| employee.name.clone())
        .collect()
}
