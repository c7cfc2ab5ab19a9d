//! CLI adapter.

use clap::{Args, Parser, Subcommand};
use log::debug;

use crate::app::commands::{
    self, Credentials, PaymentInput, admin::DeleteOptions, admin::SetStatusOptions,
    book::BookOptions, register::RegisterOptions, renew::RenewOptions, ticket::TicketOptions,
    vehicle::VehicleOptions,
};
use crate::app::{AppContext, config};
use crate::domain::AppError;
use crate::services::HttpGateway;

#[derive(Parser)]
#[command(name = "automate")]
#[command(version)]
#[command(
    about = "Client for the AutoMate vehicle-licensing services",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct CredentialArgs {
    /// Account email; prompted for when omitted
    #[arg(long)]
    email: Option<String>,
    /// Account password; prompted for when omitted
    #[arg(long)]
    password: Option<String>,
}

impl From<CredentialArgs> for Credentials {
    fn from(args: CredentialArgs) -> Self {
        Credentials { email: args.email, password: args.password }
    }
}

#[derive(Args, Debug, Clone)]
struct PaymentFlags {
    /// Payment method: card, cash or eft
    #[arg(long)]
    method: Option<String>,
    /// Cardholder name (card payments)
    #[arg(long)]
    card_holder: Option<String>,
    /// 16-digit card number (card payments)
    #[arg(long)]
    card_number: Option<String>,
    /// Card expiry as MM/YY (card payments)
    #[arg(long)]
    expiry: Option<String>,
    /// 3-digit CVV (card payments)
    #[arg(long)]
    cvv: Option<String>,
}

impl From<PaymentFlags> for PaymentInput {
    fn from(flags: PaymentFlags) -> Self {
        PaymentInput {
            method: flags.method,
            card_holder: flags.card_holder,
            card_number: flags.card_number,
            expiry: flags.expiry,
            cvv: flags.cvv,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new applicant account
    #[clap(visible_alias = "reg")]
    Register {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// 13-digit South African ID number
        #[arg(long)]
        id_number: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        cellphone: Option<String>,
        #[arg(long)]
        street: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        province: Option<String>,
        #[arg(long)]
        country: Option<String>,
        /// Date of birth as YYYY-MM-DD; must match the ID number
        #[arg(long)]
        birth_date: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Sign in and print the account summary
    Login {
        #[command(flatten)]
        credentials: CredentialArgs,
        /// Sign in against the admin endpoint
        #[arg(long)]
        admin: bool,
    },
    /// Book a learners or drivers test
    #[clap(visible_alias = "b")]
    Book {
        /// Test type: learners or drivers
        test_type: String,
        #[command(flatten)]
        credentials: CredentialArgs,
        /// Test date as YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        /// Time slot, e.g. 09:00
        #[arg(long)]
        time: Option<String>,
        /// Testing venue name; its address is filled automatically
        #[arg(long)]
        venue: Option<String>,
        /// License or learner's permit code
        #[arg(long)]
        license_code: Option<String>,
        /// Optional notes for the appointment
        #[arg(long)]
        notes: Option<String>,
        #[command(flatten)]
        payment: PaymentFlags,
    },
    /// Register a vehicle and issue its disc
    #[clap(visible_alias = "rv")]
    RegisterVehicle {
        #[command(flatten)]
        credentials: CredentialArgs,
        /// Make, e.g. Toyota
        #[arg(long)]
        make: Option<String>,
        /// Vehicle type: car, truck, motorcycle or bus
        #[arg(long = "type")]
        vehicle_type: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        engine_number: Option<String>,
        #[arg(long)]
        chassis_number: Option<String>,
        /// Optional plate preference, at most 7 characters
        #[arg(long)]
        plate: Option<String>,
        #[command(flatten)]
        payment: PaymentFlags,
    },
    /// Renew an expired vehicle disc
    RenewDisc {
        #[command(flatten)]
        credentials: CredentialArgs,
        /// Plate of the vehicle to renew; picked from the expired list when omitted
        #[arg(long)]
        plate: Option<String>,
        #[command(flatten)]
        payment: PaymentFlags,
    },
    /// Pay an outstanding traffic ticket
    PayTicket {
        /// Ticket number as printed on the notice
        ticket_number: String,
        /// Driver's license number, for verification
        #[arg(long)]
        license_number: Option<String>,
        #[command(flatten)]
        payment: PaymentFlags,
    },
    /// List your booked tests
    Bookings {
        #[command(flatten)]
        credentials: CredentialArgs,
    },
    /// List your registered vehicles
    Vehicles {
        #[command(flatten)]
        credentials: CredentialArgs,
    },
    /// Back-office operations
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Delete a record
    Delete {
        /// Entity kind: applicant, booking, payment, appointment, disc or ticket
        kind: String,
        id: u64,
        #[command(flatten)]
        credentials: CredentialArgs,
    },
    /// Set an applicant's review status
    SetStatus {
        id: u64,
        /// PENDING, ACCEPTED or REJECTED
        #[arg(long)]
        status: Option<String>,
        /// Free-text reason shown to the applicant
        #[arg(long)]
        reason: Option<String>,
        #[command(flatten)]
        credentials: CredentialArgs,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> Result<(), AppError> {
    let config = config::load()?;
    debug!("gateway base url: {}", config.api_url);
    let gateway = HttpGateway::new(&config)?;
    let mut ctx = AppContext::new(gateway);

    match command {
        Commands::Register {
            first_name,
            last_name,
            id_number,
            email,
            cellphone,
            street,
            city,
            province,
            country,
            birth_date,
            password,
            confirm_password,
        } => commands::register::execute(
            &ctx,
            RegisterOptions {
                first_name,
                last_name,
                id_number,
                email,
                cellphone,
                street,
                city,
                province,
                country,
                birth_date,
                password,
                confirm_password,
            },
        ),
        Commands::Login { credentials, admin } => {
            commands::login::execute(&mut ctx, credentials.into(), admin)
        }
        Commands::Book {
            test_type,
            credentials,
            date,
            time,
            venue,
            license_code,
            notes,
            payment,
        } => commands::book::execute(
            &mut ctx,
            BookOptions {
                test_type,
                credentials: credentials.into(),
                date,
                time,
                venue,
                license_code,
                notes,
                payment: payment.into(),
            },
        ),
        Commands::RegisterVehicle {
            credentials,
            make,
            vehicle_type,
            model,
            year,
            color,
            engine_number,
            chassis_number,
            plate,
            payment,
        } => commands::vehicle::execute(
            &mut ctx,
            VehicleOptions {
                credentials: credentials.into(),
                make,
                vehicle_type,
                model,
                year,
                color,
                engine_number,
                chassis_number,
                plate,
                payment: payment.into(),
            },
        ),
        Commands::RenewDisc { credentials, plate, payment } => commands::renew::execute(
            &mut ctx,
            RenewOptions { credentials: credentials.into(), plate, payment: payment.into() },
        ),
        Commands::PayTicket { ticket_number, license_number, payment } => {
            commands::ticket::execute(
                &ctx,
                TicketOptions { ticket_number, license_number, payment: payment.into() },
            )
        }
        Commands::Bookings { credentials } => {
            commands::listings::bookings(&mut ctx, credentials.into())
        }
        Commands::Vehicles { credentials } => {
            commands::listings::vehicles(&mut ctx, credentials.into())
        }
        Commands::Admin { command } => match command {
            AdminCommands::Delete { kind, id, credentials } => commands::admin::delete(
                &mut ctx,
                DeleteOptions { credentials: credentials.into(), kind, id },
            ),
            AdminCommands::SetStatus { id, status, reason, credentials } => {
                commands::admin::set_status(
                    &mut ctx,
                    SetStatusOptions { credentials: credentials.into(), id, status, reason },
                )
            }
        },
    }
}
