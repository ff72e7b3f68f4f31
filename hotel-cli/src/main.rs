mod api;
mod render;

use anyhow::{Context, Result};
use api::{ApiClient, RoomsResponse};
use clap::{Parser, Subcommand};
use hotel_allocator::{BookingError, RoomStore, booking};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hotel-cli")]
#[command(about = "Book hotel rooms with the lowest travel time")]
struct Cli {
    /// Base URL of a running hotel API server
    #[arg(long, env = "HOTEL_API_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current floor plan
    Rooms,
    /// Book 1-5 rooms
    Book { count: i64 },
    /// Free every room
    Reset,
    /// Randomly occupy rooms
    Random {
        #[arg(long)]
        probability: Option<f64>,
    },
    /// Run a sequence of bookings against a local hotel, no server needed
    Simulate {
        /// Room counts to book, in order
        #[arg(required = true, num_args = 1..)]
        requests: Vec<i64>,
        /// Occupy rooms at random before booking, 0.4 when given without a value
        #[arg(long, num_args = 0..=1, default_missing_value = "0.4")]
        occupancy: Option<f64>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn print_response(response: &RoomsResponse) {
    if let Some(message) = &response.message {
        println!("{}", message);
    }
    if !response.booked_room_ids.is_empty() {
        let ids: Vec<String> = response.booked_room_ids.iter().map(u32::to_string).collect();
        println!("Booked rooms: {}", ids.join(", "));
        println!("Travel time: {} min", response.travel_time.unwrap_or(0));
    }
    print!("{}", render::floor_plan(&response.rooms, &response.booked_room_ids));
}

fn simulate(requests: &[i64], occupancy: Option<f64>, seed: u64) -> Result<()> {
    let mut store = RoomStore::new();
    if let Some(probability) = occupancy {
        let mut rng = StdRng::seed_from_u64(seed);
        store
            .randomize_occupancy_with(&mut rng, probability)
            .context("Failed to randomize occupancy")?;
        println!(
            "Seed {}: {} of {} rooms occupied",
            seed,
            store.booked_count(),
            store.list_all().len()
        );
    }

    let mut last = Vec::new();
    for &count in requests {
        match booking::book(&mut store, count) {
            Ok(booking) => {
                println!(
                    "book {}: rooms {:?}, travel time {}",
                    count, booking.room_ids, booking.travel_time
                );
                last = booking.room_ids;
            }
            Err(err @ (BookingError::InvalidCount(_)
            | BookingError::InsufficientRooms { .. }
            | BookingError::NoArrangement(_))) => {
                println!("book {}: rejected, {}", count, err);
            }
            Err(err) => return Err(err.into()),
        }
    }

    print!("{}", render::floor_plan(store.list_all(), &last));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let api = ApiClient::new(cli.base_url);

    match cli.command {
        Commands::Rooms => print_response(&api.rooms().await?),
        Commands::Book { count } => print_response(&api.book(count).await?),
        Commands::Reset => print_response(&api.reset().await?),
        Commands::Random { probability } => print_response(&api.random(probability).await?),
        Commands::Simulate {
            requests,
            occupancy,
            seed,
        } => simulate(&requests, occupancy, seed)?,
    }

    Ok(())
}
