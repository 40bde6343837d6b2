//! `fleet-admin`: drive the fleet backend's admin surface from a terminal.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]
#![expect(clippy::print_stdout, reason = "the CLI reports results on stdout")]

use std::ffi::OsString;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use fleet_client::ClientSettings;
use fleet_client::domain::ports::{PredictionSource, ProfileGateway};
use fleet_client::domain::{
    AccountFields, DriverProfile, EntityId, FieldGroup, ListDetailViewModel, MechanicProfile,
    Registration, ResourceKind, SessionContext, Sex, ViewState,
};
use fleet_client::outbound::http::{HttpClients, HttpResourceClient};
use ortho_config::OrthoConfig;
use serde_json::Value;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

/// `fleet-admin` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "fleet-admin",
    about = "Manage rides, drivers, and mechanics on the fleet backend",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and print the role and home destination.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Register a new admin, driver, or mechanic account.
    Register(RegisterArgs),
    /// List a resource's records.
    List {
        /// `rides`, `drivers`, or `mechanics`.
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,
    },
    /// Show one record with both field groups.
    Show {
        /// `rides`, `drivers`, or `mechanics`.
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,
        /// Record identifier.
        id: EntityId,
    },
    /// Create a record from `name=value` fields.
    Create {
        /// `rides`, `drivers`, or `mechanics`.
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,
        /// Field assignment; values are JSON when they parse, text otherwise.
        #[arg(long = "field", value_name = "name=value", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Update a record from `name=value` fields.
    Update {
        /// `rides`, `drivers`, or `mechanics`.
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,
        /// Record identifier.
        id: EntityId,
        /// Field assignment; values are JSON when they parse, text otherwise.
        #[arg(long = "field", value_name = "name=value", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Delete a record. Deleting a missing record succeeds.
    Delete {
        /// `rides`, `drivers`, or `mechanics`.
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,
        /// Record identifier.
        id: EntityId,
    },
    /// Update the logged-in driver's or mechanic's own profile.
    UpdateProfile {
        /// `drivers` or `mechanics`.
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,
        /// Field assignment; values are JSON when they parse, text otherwise.
        #[arg(long = "field", value_name = "name=value", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Trigger the prediction model.
    Predict,
}

#[derive(Debug, Args)]
struct RegisterArgs {
    /// `admin`, `driver`, or `mechanic`.
    role: String,
    #[arg(long)]
    firstname: String,
    #[arg(long)]
    lastname: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    /// Required for drivers and mechanics.
    #[arg(long, default_value_t = 0)]
    age: u32,
    #[arg(long, value_parser = parse_sex, default_value = "male")]
    sex: Sex,
    /// Initial driver or mechanic rating.
    #[arg(long, default_value_t = 0.0)]
    rating: f64,
    #[arg(long, default_value_t = 0)]
    rides: u32,
    #[arg(long, default_value_t = 0)]
    accidents: u32,
    /// `YYYY-MM-DD`; defaults to today.
    #[arg(long)]
    first_ride_date: Option<NaiveDate>,
    #[arg(long, default_value_t = 0)]
    repairs: u32,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = ClientSettings::load_from_iter([OsString::from("fleet-admin")])
        .wrap_err("load client settings")?;
    let clients = HttpClients::from_settings(&settings)?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(args.command, &clients))
}

async fn run(command: Command, clients: &HttpClients) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let mut session = SessionContext::new(Arc::new(clients.access()));
            let identity = session.login(&email, &password).await?;
            println!("role={}", identity.role());
            println!("destination={}", identity.destination());
        }
        Command::Register(args) => {
            let session = SessionContext::new(Arc::new(clients.access()));
            let registration = registration_from_args(args)?;
            session
                .register(registration, Local::now().date_naive())
                .await?;
            println!("registered");
        }
        Command::List { resource } => {
            let mut view = view_model(clients, resource);
            view.refresh().await;
            ensure_loaded(&view)?;
            for summary in view.collection() {
                println!("{}", Value::Object(summary.fields().clone()));
            }
        }
        Command::Show { resource, id } => {
            let mut view = view_model(clients, resource);
            view.select(id).await;
            let entity = view
                .selection()
                .ok_or_else(|| failure_message(&view))?;
            let descriptor = resource.descriptor();
            println!("{}={}", descriptor.primary_key(), Value::Object(entity.primary().clone()));
            println!("{}={}", descriptor.detail_key(), Value::Object(entity.detail().clone()));
        }
        Command::Create { resource, fields } => {
            let payload = resource.descriptor().create_payload(&to_form(fields));
            let mut view = view_model(clients, resource);
            view.create(&payload).await;
            ensure_loaded(&view)?;
            println!("created; {} records", view.collection().len());
        }
        Command::Update {
            resource,
            id,
            fields,
        } => {
            let payload = resource.descriptor().update_payload(&to_form(fields));
            let mut view = view_model(clients, resource);
            view.update(id, &payload).await;
            ensure_loaded(&view)?;
            println!("updated {id}");
        }
        Command::Delete { resource, id } => {
            let mut view = view_model(clients, resource);
            view.remove(id).await;
            ensure_loaded(&view)?;
            println!("deleted {id}; {} records", view.collection().len());
        }
        Command::UpdateProfile { resource, fields } => {
            if resource == ResourceKind::Rides {
                return Err(eyre!("profiles exist only for drivers and mechanics"));
            }
            let payload = resource.descriptor().update_payload(&to_form(fields));
            clients.resource(resource).update_profile(&payload).await?;
            println!("profile updated");
        }
        Command::Predict => {
            let outcome = clients.prediction().trigger().await?;
            if !outcome.is_success() {
                return Err(eyre!("prediction failed with status {}", outcome.status));
            }
            println!("prediction accepted (status {})", outcome.status);
        }
    }
    Ok(())
}

fn view_model(clients: &HttpClients, kind: ResourceKind) -> ListDetailViewModel<HttpResourceClient> {
    ListDetailViewModel::new(Arc::new(clients.resource(kind)))
}

fn ensure_loaded(view: &ListDetailViewModel<HttpResourceClient>) -> Result<()> {
    if view.state() == ViewState::Loaded {
        Ok(())
    } else {
        Err(failure_message(view))
    }
}

fn failure_message(view: &ListDetailViewModel<HttpResourceClient>) -> color_eyre::Report {
    view.error()
        .map_or_else(|| eyre!("operation did not complete"), |err| eyre!("{err}"))
}

fn registration_from_args(args: RegisterArgs) -> Result<Registration> {
    let account = AccountFields {
        firstname: args.firstname,
        lastname: args.lastname,
        email: args.email,
        password: Zeroizing::new(args.password),
    };
    match args.role.trim().to_ascii_lowercase().as_str() {
        "admin" => Ok(Registration::Admin(account)),
        "driver" => Ok(Registration::Driver(
            account,
            DriverProfile {
                age: args.age,
                sex: args.sex,
                driver_rating: args.rating,
                driver_rides: args.rides,
                driver_time_accidents: args.accidents,
                first_ride_date: args.first_ride_date,
            },
        )),
        "mechanic" => Ok(Registration::Mechanic(
            account,
            MechanicProfile {
                age: args.age,
                sex: args.sex,
                mechanic_rating: args.rating,
                car_times_repaired: args.repairs,
            },
        )),
        other => Err(eyre!("unknown role {other:?}; expected admin, driver, or mechanic")),
    }
}

fn to_form(fields: Vec<(String, Value)>) -> FieldGroup {
    fields.into_iter().collect()
}

fn parse_resource(raw: &str) -> Result<ResourceKind, String> {
    ResourceKind::from_base_path(raw)
        .ok_or_else(|| format!("unknown resource {raw:?}; expected rides, drivers, or mechanics"))
}

fn parse_sex(raw: &str) -> Result<Sex, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "male" => Ok(Sex::Male),
        "female" => Ok(Sex::Female),
        other => Err(format!("unknown sex {other:?}")),
    }
}

fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("field {raw:?} must look like name=value"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("field {raw:?} has no name"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()));
    Ok((name.to_owned(), value))
}
