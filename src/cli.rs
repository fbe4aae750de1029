use crate::client::TaskSaathiClient;
use crate::config::Config;
use crate::domain::auth::{Registration, RegistrationOutcome};
use crate::domain::envelope::Envelope;
use crate::domain::session::Role;
use crate::domain::task::{NewTask, TaskChanges, TaskPriority, TaskQuery, TaskStatus};
use crate::error::ClientError;
use crate::storage::{FileStore, KeyValueStore};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "tasksaathi", version, about = "Command-line client for the TaskSaathi task service", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TASKSAATHI_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register(RegisterArgs),
    /// Revoke and forget the stored session
    Logout,
    /// Exchange the stored refresh token for a new access token
    Refresh,
    /// Show the stored session
    Whoami,
    /// Work with tasks
    #[command(subcommand)]
    Tasks(TaskCommand),
    /// Work with the signed-in user's company
    #[command(subcommand)]
    Company(CompanyCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Employer,
    Employee,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Employer => Self::Employer,
            RoleArg::Employee => Self::Employee,
        }
    }
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "TASKSAATHI_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long, value_enum)]
    pub role: RoleArg,
    #[arg(long)]
    pub phone_number: Option<String>,
    #[arg(long)]
    pub company_name: Option<String>,
    #[arg(long)]
    pub contact_number: Option<String>,
    #[arg(long)]
    pub registration_document: Option<String>,
}

impl From<RegisterArgs> for Registration {
    fn from(args: RegisterArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            password: args.password,
            user_role: args.role.into(),
            phone_number: args.phone_number,
            company_name: args.company_name,
            contact_number: args.contact_number,
            registration_document: args.registration_document,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Tasks visible to the signed-in user
    List(ListArgs),
    /// Tasks assigned to the signed-in user
    Mine,
    /// All tasks of the signed-in employer's company
    Company,
    /// Create a task
    Create(CreateArgs),
    /// Change fields of a task
    Update(UpdateArgs),
    /// Change only the status of a task
    Status {
        id: Uuid,
        #[arg(value_enum)]
        status: TaskStatus,
    },
    /// Delete a task
    Delete { id: Uuid },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, value_enum)]
    pub status: Option<TaskStatus>,
    #[arg(long, value_enum)]
    pub priority: Option<TaskPriority>,
    #[arg(long)]
    pub search: Option<String>,
    /// Sort field, prefix with `-` for descending
    #[arg(long, allow_hyphen_values = true)]
    pub ordering: Option<String>,
    #[arg(long)]
    pub assigned_to: Option<Uuid>,
    #[arg(long)]
    pub due_date_from: Option<String>,
    #[arg(long)]
    pub due_date_to: Option<String>,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub offset: Option<u32>,
}

impl From<ListArgs> for TaskQuery {
    fn from(args: ListArgs) -> Self {
        Self {
            status: args.status,
            priority: args.priority,
            search: args.search,
            ordering: args.ordering,
            assigned_to: args.assigned_to,
            due_date_from: args.due_date_from,
            due_date_to: args.due_date_to,
            limit: args.limit,
            offset: args.offset,
        }
    }
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub assigned_to: Uuid,
    #[arg(long, value_enum)]
    pub status: Option<TaskStatus>,
    #[arg(long, value_enum)]
    pub priority: Option<TaskPriority>,
    /// Due date as `YYYY-MM-DD`
    #[arg(long)]
    pub due_date: Option<String>,
    /// Defaults to the signed-in user
    #[arg(long)]
    pub created_by: Option<Uuid>,
    /// Defaults to the signed-in user's company
    #[arg(long)]
    pub company_id: Option<Uuid>,
}

impl From<CreateArgs> for NewTask {
    fn from(args: CreateArgs) -> Self {
        Self {
            title: args.title,
            description: args.description,
            assigned_to: args.assigned_to,
            status: args.status,
            priority: args.priority,
            due_date: args.due_date,
            created_by: args.created_by,
            company_id: args.company_id,
        }
    }
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("changes")
        .required(true)
        .multiple(true)
        .args(["title", "description", "status", "priority", "due_date", "assigned_to"])
))]
pub struct UpdateArgs {
    pub id: Uuid,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_enum)]
    pub status: Option<TaskStatus>,
    #[arg(long, value_enum)]
    pub priority: Option<TaskPriority>,
    #[arg(long)]
    pub due_date: Option<String>,
    #[arg(long)]
    pub assigned_to: Option<Uuid>,
}

impl UpdateArgs {
    fn into_parts(self) -> (Uuid, TaskChanges) {
        let changes = TaskChanges {
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            assigned_to: self.assigned_to,
        };
        (self.id, changes)
    }
}

#[derive(Debug, Subcommand)]
pub enum CompanyCommand {
    /// The company owned by the signed-in user
    Show,
    /// Employees of the signed-in user's company
    Employees,
}

fn to_envelope<T: Serialize>(result: Result<T, ClientError>) -> anyhow::Result<Envelope<Value>> {
    Ok(match result {
        Ok(data) => Envelope::success(serde_json::to_value(data)?),
        Err(e) => Envelope::failure(e.to_string()),
    })
}

/// Runs one command against the session file named in the configuration.
///
/// Operation failures are reported inside the returned envelope.
///
/// # Errors
/// Returns an error only when the client cannot be constructed or a result
/// cannot be rendered as JSON.
pub async fn run(cli: Cli) -> anyhow::Result<Envelope<Value>> {
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(cli.config.session.session_file.clone()));
    let client = TaskSaathiClient::new(&cli.config.api, store)?;
    execute(&client, cli.command).await
}

/// Dispatches a parsed command to `client`.
///
/// # Errors
/// Returns an error if a result cannot be rendered as JSON.
pub async fn execute(client: &TaskSaathiClient, command: Command) -> anyhow::Result<Envelope<Value>> {
    match command {
        Command::Login { email, password } => to_envelope(
            client.login(&email, &password).await.map(|data| {
                let session = data.to_session();
                json!({ "user": session.user, "userId": session.user_id })
            }),
        ),
        Command::Register(args) => {
            let registration = Registration::from(args);
            match client.register(&registration).await {
                Ok(outcome) => {
                    let message = outcome.message();
                    let envelope = Envelope::success(serde_json::to_value(&outcome)?);
                    Ok(match (message, outcome) {
                        (Some(message), _) => envelope.with_message(message),
                        (None, RegistrationOutcome::SignedIn(_)) => envelope.with_message("Registered and signed in"),
                        (None, _) => envelope,
                    })
                }
                Err(e) => Ok(Envelope::failure(e.to_string())),
            }
        }
        Command::Logout => Ok(match client.logout().await {
            Ok(()) => Envelope::done().with_message("Signed out"),
            Err(e) => Envelope::failure(e.to_string()),
        }),
        Command::Refresh => to_envelope(client.refresh().await.map(|tokens| json!({ "rotated": tokens.refresh.is_some() }))),
        Command::Whoami => to_envelope(whoami(client).await),
        Command::Tasks(command) => tasks(client, command).await,
        Command::Company(CompanyCommand::Show) => to_envelope(client.get_company_details().await),
        Command::Company(CompanyCommand::Employees) => to_envelope(client.get_company_employees().await),
    }
}

async fn whoami(client: &TaskSaathiClient) -> Result<Value, ClientError> {
    let authenticated = client.is_authenticated().await?;
    let role = client.get_user_role().await?.map(String::from);
    let user = client.get_user_data().await?;
    Ok(json!({ "authenticated": authenticated, "role": role, "user": user }))
}

/// Fills the creator and company the backend requires from the stored session
/// when they were not given on the command line.
async fn new_task(client: &TaskSaathiClient, args: CreateArgs) -> Result<NewTask, ClientError> {
    let mut task = NewTask::from(args);
    if task.created_by.is_some() && task.company_id.is_some() {
        return Ok(task);
    }

    let Some(session) = client.sessions().load().await? else {
        return Ok(task);
    };
    if task.created_by.is_none() {
        task.created_by = session.user_id.as_deref().and_then(|id| Uuid::parse_str(id).ok());
    }
    if task.company_id.is_none() {
        task.company_id = session
            .user
            .as_ref()
            .and_then(|user| user.company())
            .and_then(|company| Uuid::parse_str(&company.id).ok());
    }
    Ok(task)
}

async fn tasks(client: &TaskSaathiClient, command: TaskCommand) -> anyhow::Result<Envelope<Value>> {
    match command {
        TaskCommand::List(args) => to_envelope(client.get_tasks(&TaskQuery::from(args)).await),
        TaskCommand::Mine => to_envelope(client.get_my_tasks().await),
        TaskCommand::Company => to_envelope(client.get_company_tasks().await),
        TaskCommand::Create(args) => match new_task(client, args).await {
            Ok(task) => to_envelope(client.create_task(&task).await),
            Err(e) => Ok(Envelope::failure(e.to_string())),
        },
        TaskCommand::Update(args) => {
            let (id, changes) = args.into_parts();
            to_envelope(client.update_task(id, &changes).await)
        }
        TaskCommand::Status { id, status } => to_envelope(client.update_task_status(id, status).await),
        TaskCommand::Delete { id } => Ok(match client.delete_task(id).await {
            Ok(()) => Envelope::done(),
            Err(e) => Envelope::failure(e.to_string()),
        }),
    }
}
