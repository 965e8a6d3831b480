use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat};
use gcloud_gax::grpc::Code;
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::client::{Client, ClientConfig};
use gcloud_spanner::mutation::insert;
use gcloud_spanner::row::Row;
use gcloud_spanner::statement::Statement;
use gcloud_spanner::value::CommitTimestamp;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::models::{Employee, NewEmployee};

const TABLE: &str = "employees";

const SELECT_EMPLOYEE: &str = "SELECT id, name, email, age, work_experience, phone_number, \
     FORMAT_TIMESTAMP('%Y-%m-%dT%H:%M:%E*SZ', registered_at, 'UTC') AS registered_at \
     FROM employees";

/// Unique-field lookups used by registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    PhoneNumber,
}

impl UniqueField {
    fn column(self) -> &'static str {
        match self {
            UniqueField::Email => "email",
            UniqueField::PhoneNumber => "phone_number",
        }
    }
}

/// Shareable Spanner client for use across async handlers
#[derive(Clone)]
pub struct SpannerClient {
    inner: Arc<Client>,
}

impl SpannerClient {
    /// Create a new Spanner client from configuration
    ///
    /// The gcloud-spanner library picks up SPANNER_EMULATOR_HOST on its own and
    /// connects to the emulator when it is set. The instance, database and
    /// `employees` table are created first if they don't exist.
    pub async fn from_config(config: &Config) -> Result<Self> {
        auto_provision(config).await?;

        let database_path = format!(
            "projects/{}/instances/{}/databases/{}",
            config.spanner_project, config.spanner_instance, config.spanner_database
        );

        match &config.spanner_emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
        })
    }

    /// Whether any employee already uses `value` for the given field
    pub async fn exists_by(&self, field: UniqueField, value: &str) -> Result<bool> {
        let mut statement = Statement::new(format!(
            "SELECT id FROM employees WHERE {} = @value LIMIT 1",
            field.column()
        ));
        statement.add_param("value", &value.to_string());

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .with_context(|| format!("Failed to look up employee by {}", field.column()))?;

        Ok(result_set.next().await?.is_some())
    }

    /// Insert a new employee row under `id`
    ///
    /// `registered_at` is set to the commit timestamp.
    pub async fn insert(&self, id: Uuid, employee: &NewEmployee) -> Result<()> {
        let id_str = id.to_string();

        let mutation = insert(
            TABLE,
            &[
                "id",
                "name",
                "email",
                "age",
                "work_experience",
                "phone_number",
                "registered_at",
            ],
            &[
                &id_str,
                &employee.name,
                &employee.email,
                &employee.age,
                &employee.work_experience,
                &employee.phone_number,
                &CommitTimestamp::new(),
            ],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to insert employee into Spanner")?;

        tracing::debug!("Inserted employee with id: {}", id);
        Ok(())
    }

    /// Read one employee by id
    ///
    /// # Returns
    /// * `Ok(Some(employee))` - Employee found
    /// * `Ok(None)` - No employee with this id
    /// * `Err(_)` - Spanner operation failed
    pub async fn read(&self, id: Uuid) -> Result<Option<Employee>> {
        let mut statement = Statement::new(format!("{} WHERE id = @id", SELECT_EMPLOYEE));
        statement.add_param("id", &id.to_string());

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query employee from Spanner")?;

        match result_set.next().await? {
            Some(row) => Ok(Some(employee_from_row(&row)?)),
            None => {
                tracing::debug!("Employee not found with id: {}", id);
                Ok(None)
            }
        }
    }

    /// List every employee, oldest registration first
    pub async fn list_all(&self) -> Result<Vec<Employee>> {
        let statement = Statement::new(format!("{} ORDER BY registered_at, id", SELECT_EMPLOYEE));

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to list employees from Spanner")?;

        let mut employees = Vec::new();
        while let Some(row) = result_set.next().await? {
            employees.push(employee_from_row(&row)?);
        }

        tracing::debug!("Listed {} employees", employees.len());
        Ok(employees)
    }
}

fn employee_from_row(row: &Row) -> Result<Employee> {
    let registered_at: Option<String> = row.column_by_name("registered_at")?;
    let registered_at = registered_at
        .map(|ts| {
            DateTime::parse_from_rfc3339(&ts)
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
                .context("Failed to parse registered_at timestamp")
        })
        .transpose()?;

    Ok(Employee {
        id: row.column_by_name("id")?,
        name: row.column_by_name("name")?,
        email: row.column_by_name("email")?,
        age: row.column_by_name("age")?,
        work_experience: row.column_by_name("work_experience")?,
        phone_number: row.column_by_name("phone_number")?,
        registered_at,
    })
}

/// Automatically provision Spanner instance, database, and table
///
/// Enables zero-setup local development with the emulator.
async fn auto_provision(config: &Config) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let admin_client = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    let project_path = format!("projects/{}", config.spanner_project);
    let instance_path = format!("{}/instances/{}", project_path, config.spanner_instance);
    let database_path = format!("{}/databases/{}", instance_path, config.spanner_database);

    ensure_instance_exists(&admin_client, config, &project_path, &instance_path).await?;
    ensure_database_exists(&admin_client, &instance_path, &database_path).await?;
    ensure_table_exists(&admin_client, &database_path).await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

async fn ensure_instance_exists(
    admin_client: &AdminClient,
    config: &Config,
    project_path: &str,
    instance_path: &str,
) -> Result<()> {
    let get_request = GetInstanceRequest {
        name: instance_path.to_string(),
        field_mask: None,
    };

    match admin_client.instance().get_instance(get_request, None).await {
        Ok(_) => {
            tracing::info!("Instance already exists: {}", instance_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Instance not found, creating: {}", instance_path);

            let instance_config = if config.spanner_emulator_host.is_some() {
                format!("{}/instanceConfigs/emulator-config", project_path)
            } else {
                format!("{}/instanceConfigs/regional-us-central1", project_path)
            };

            let create_request = CreateInstanceRequest {
                parent: project_path.to_string(),
                instance_id: config.spanner_instance.clone(),
                instance: Some(Instance {
                    name: instance_path.to_string(),
                    config: instance_config,
                    display_name: format!("{} instance", config.spanner_instance),
                    node_count: 1,
                    ..Default::default()
                }),
            };

            let mut operation = admin_client
                .instance()
                .create_instance(create_request, None)
                .await
                .context("Failed to start instance creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create instance")?;

            tracing::info!("Instance created successfully: {}", instance_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check instance existence: {}",
            e.message()
        )),
    }
}

async fn ensure_database_exists(
    admin_client: &AdminClient,
    instance_path: &str,
    database_path: &str,
) -> Result<()> {
    let get_request = GetDatabaseRequest {
        name: database_path.to_string(),
    };

    match admin_client
        .database()
        .get_database(get_request, None)
        .await
    {
        Ok(_) => {
            tracing::info!("Database already exists: {}", database_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Database not found, creating: {}", database_path);

            let database_id = database_path
                .split('/')
                .next_back()
                .context("Invalid database path")?;

            let create_request = CreateDatabaseRequest {
                parent: instance_path.to_string(),
                create_statement: format!("CREATE DATABASE `{}`", database_id),
                extra_statements: vec![],
                encryption_config: None,
                database_dialect: 1, // Google Standard SQL
                proto_descriptors: vec![],
            };

            let mut operation = admin_client
                .database()
                .create_database(create_request, None)
                .await
                .context("Failed to start database creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create database")?;

            tracing::info!("Database created successfully: {}", database_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check database existence: {}",
            e.message()
        )),
    }
}

/// DDL for the employees table and its lookup indexes
fn employees_ddl() -> Vec<String> {
    vec![
        r#"
CREATE TABLE employees (
    id STRING(36) NOT NULL,
    name STRING(MAX) NOT NULL,
    email STRING(MAX) NOT NULL,
    age INT64 NOT NULL,
    work_experience INT64 NOT NULL,
    phone_number STRING(MAX) NOT NULL,
    registered_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
) PRIMARY KEY (id)
"#
        .trim()
        .to_string(),
        "CREATE INDEX employees_by_email ON employees(email)".to_string(),
        "CREATE INDEX employees_by_phone_number ON employees(phone_number)".to_string(),
    ]
}

async fn ensure_table_exists(admin_client: &AdminClient, database_path: &str) -> Result<()> {
    let get_ddl_request = GetDatabaseDdlRequest {
        database: database_path.to_string(),
    };

    let ddl_response = admin_client
        .database()
        .get_database_ddl(get_ddl_request, None)
        .await
        .context("Failed to get database DDL")?;

    let table_exists = ddl_response.into_inner().statements.iter().any(|stmt| {
        stmt.contains("CREATE TABLE employees") || stmt.contains("CREATE TABLE `employees`")
    });

    if table_exists {
        tracing::info!("Table '{}' already exists", TABLE);
        return Ok(());
    }

    tracing::info!("Table '{}' not found, creating...", TABLE);

    let update_request = UpdateDatabaseDdlRequest {
        database: database_path.to_string(),
        statements: employees_ddl(),
        operation_id: String::new(),
        proto_descriptors: vec![],
        throughput_mode: false,
    };

    let mut operation = admin_client
        .database()
        .update_database_ddl(update_request, None)
        .await
        .context("Failed to start table creation")?;

    operation
        .wait(None)
        .await
        .context("Failed to create table")?;

    tracing::info!("Table '{}' created successfully", TABLE);
    Ok(())
}
