//! Subcommands.

mod forms;
mod records;

use clap::{Args, Subcommand};
use fleet_lib::FleetClient;
use fleet_lib::model::{BookingStatus, VehicleStatus};

use crate::error::CliError;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a vehicle to the fleet
    AddVehicle(AddVehicleArgs),

    /// Search for vehicles available for a ride
    Search(RouteArgs),

    /// Book a vehicle for a ride
    Book(BookArgs),

    /// List vehicles
    Vehicles(VehicleListArgs),

    /// List bookings
    Bookings(BookingListArgs),

    /// Change a vehicle's status
    VehicleStatus {
        /// Vehicle id
        id: String,
        /// active, maintenance or inactive
        status: VehicleStatus,
    },

    /// Change a booking's status
    BookingStatus {
        /// Booking id
        id: String,
        /// pending, confirmed, in-progress, completed or cancelled
        status: BookingStatus,
    },

    /// Cancel a booking
    Cancel {
        /// Booking id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct AddVehicleArgs {
    /// Vehicle name
    #[arg(long)]
    pub name: Option<String>,

    /// Capacity in kilograms
    #[arg(long)]
    pub capacity: Option<String>,

    /// Number of tyres
    #[arg(long)]
    pub tyres: Option<String>,
}

#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Required capacity in kilograms
    #[arg(long)]
    pub capacity: Option<String>,

    /// Pickup pincode
    #[arg(long)]
    pub from: Option<String>,

    /// Destination pincode
    #[arg(long)]
    pub to: Option<String>,

    /// Start time, RFC 3339 or YYYY-MM-DDTHH:MM local time
    #[arg(long)]
    pub start: Option<String>,
}

#[derive(Debug, Args)]
pub struct BookArgs {
    /// Vehicle id from a search result
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Customer id
    #[arg(long)]
    pub customer: Option<String>,

    /// Pickup pincode
    #[arg(long)]
    pub from: Option<String>,

    /// Destination pincode
    #[arg(long)]
    pub to: Option<String>,

    /// Start time, RFC 3339 or YYYY-MM-DDTHH:MM local time
    #[arg(long)]
    pub start: Option<String>,
}

#[derive(Debug, Args)]
pub struct VehicleListArgs {
    #[arg(long)]
    pub status: Option<VehicleStatus>,

    /// Only show rows matching this text
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Debug, Args)]
pub struct BookingListArgs {
    #[arg(long)]
    pub status: Option<BookingStatus>,

    #[arg(long)]
    pub customer: Option<String>,

    /// Only show rows matching this text
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

pub async fn run(command: Command, client: &FleetClient) -> Result<(), CliError> {
    match command {
        Command::AddVehicle(args) => forms::add_vehicle(client, args).await,
        Command::Search(args) => forms::search(client, args).await,
        Command::Book(args) => forms::book(client, args).await,
        Command::Vehicles(args) => records::vehicles(client, args).await,
        Command::Bookings(args) => records::bookings(client, args).await,
        Command::VehicleStatus { id, status } => records::vehicle_status(client, &id, status).await,
        Command::BookingStatus { id, status } => records::booking_status(client, &id, status).await,
        Command::Cancel { id } => {
            records::booking_status(client, &id, BookingStatus::Cancelled).await
        }
    }
}
