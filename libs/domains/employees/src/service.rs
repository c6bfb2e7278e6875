use std::sync::Arc;
use tracing::{info, warn};

use crate::aggregator;
use crate::error::{EmployeeError, EmployeeResult};
use crate::models::{CreateEmployee, Employee};
use crate::upstream::EmployeeUpstream;
use crate::validation::parse_employee_id;

/// Gateway use cases over the upstream employee service.
///
/// Holds no state between calls: every read fetches fresh upstream data.
pub struct EmployeeService<U: EmployeeUpstream> {
    upstream: Arc<U>,
}

impl<U: EmployeeUpstream> Clone for EmployeeService<U> {
    fn clone(&self) -> Self {
        Self {
            upstream: Arc::clone(&self.upstream),
        }
    }
}

impl<U: EmployeeUpstream> EmployeeService<U> {
    pub fn new(upstream: U) -> Self {
        Self {
            upstream: Arc::new(upstream),
        }
    }

    /// List every employee
    pub async fn list_employees(&self) -> EmployeeResult<Vec<Employee>> {
        info!("Fetching all employees");
        self.upstream.list().await
    }

    /// Employees whose name contains `fragment`, ignoring case
    pub async fn search_employees(&self, fragment: &str) -> EmployeeResult<Vec<Employee>> {
        info!("Searching employees by name fragment '{}'", fragment);
        let employees = self.upstream.list().await?;
        Ok(aggregator::search_by_name(&employees, fragment))
    }

    /// Get an employee by id. The id is validated before any upstream call.
    pub async fn get_employee(&self, raw_id: &str) -> EmployeeResult<Employee> {
        let id = parse_employee_id(raw_id)?;
        info!("Fetching employee {}", id);

        self.upstream.get_by_id(id).await?.ok_or_else(|| {
            warn!("Employee {} not found upstream", id);
            EmployeeError::NotFound(id)
        })
    }

    /// Highest salary across all employees, 0 when there are none
    pub async fn highest_salary(&self) -> EmployeeResult<u32> {
        let employees = self.upstream.list().await?;
        Ok(aggregator::max_salary(&employees))
    }

    /// Names of the ten highest earners, best paid first
    pub async fn top_ten_earner_names(&self) -> EmployeeResult<Vec<String>> {
        let employees = self.upstream.list().await?;
        Ok(aggregator::top_earner_names(&employees))
    }

    pub async fn create_employee(&self, input: CreateEmployee) -> EmployeeResult<Employee> {
        info!("Creating employee '{}'", input.name);
        self.upstream.create(&input).await
    }

    /// Delete an employee by id and return its name.
    ///
    /// The upstream deletes by name, so the employee is resolved first.
    pub async fn delete_employee(&self, raw_id: &str) -> EmployeeResult<String> {
        let employee = self.get_employee(raw_id).await?;
        info!("Deleting employee {} ({})", employee.id, employee.name);

        if self.upstream.delete_by_name(&employee.name).await? {
            Ok(employee.name)
        } else {
            Err(EmployeeError::DeleteRejected(employee.name))
        }
    }
}
