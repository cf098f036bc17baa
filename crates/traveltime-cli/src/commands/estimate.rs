//! Estimate and compare commands.

use chrono::NaiveDateTime;
use clap::Args;
use serde::Serialize;

use traveltime_core::{
    Estimate, EstimateRequest, TransportMethod, TravelTimeEstimator, UserProfileView,
};

use crate::common::{load_config, parse_event_time};

#[derive(Args)]
pub struct EstimateArgs {
    /// Where the trip starts
    #[arg(long = "from")]
    pub origin: String,
    /// Where the event takes place
    #[arg(long = "to")]
    pub destination: String,
    /// walking, cycling, car or public_transport
    #[arg(long, default_value = "car")]
    pub mode: String,
    /// Event time (YYYY-MM-DD HH:MM), defaults to now
    #[arg(long)]
    pub at: Option<String>,
    /// Ignore the stored home/work/university hints
    #[arg(long)]
    pub no_profile: bool,
    /// Print JSON
    #[arg(long)]
    pub json: bool,
    /// Show every pipeline stage
    #[arg(long)]
    pub explain: bool,
}

#[derive(Args)]
pub struct CompareArgs {
    #[arg(long = "from")]
    pub origin: String,
    #[arg(long = "to")]
    pub destination: String,
    /// Event time (YYYY-MM-DD HH:MM), defaults to now
    #[arg(long)]
    pub at: Option<String>,
    #[arg(long)]
    pub no_profile: bool,
    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct EstimateOutput<'a> {
    event_time: NaiveDateTime,
    departure_time: NaiveDateTime,
    #[serde(flatten)]
    estimate: &'a Estimate,
}

pub fn run_estimate(args: EstimateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let method: TransportMethod = args.mode.parse()?;
    let event_time = parse_event_time(args.at.as_deref())?;
    let config = load_config();
    let profile = config.profile.clone();
    let estimator = TravelTimeEstimator::new(config);

    let mut request = EstimateRequest::new(&args.origin, &args.destination, method, event_time);
    if !args.no_profile {
        request = request.with_profile(&profile as &dyn UserProfileView);
    }
    tracing::debug!(
        %method,
        %event_time,
        origin = %args.origin,
        destination = %args.destination,
        "estimating"
    );
    let estimate = estimator.explain(&request);

    if args.json {
        let output = EstimateOutput {
            event_time,
            departure_time: estimate.departure_time(event_time),
            estimate: &estimate,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} min by {} (leave by {})",
        estimate.minutes,
        method,
        estimate.departure_time(event_time).format("%Y-%m-%d %H:%M")
    );
    if args.explain {
        print_explanation(&estimate);
    }
    Ok(())
}

fn print_explanation(estimate: &Estimate) {
    if estimate.same_location {
        println!("  same location: prep time only");
        return;
    }
    if let (Some(category), Some(rule)) = (estimate.category, estimate.rule) {
        println!("  distance:  {category} (rule: {rule:?})");
    }
    if let Some(base) = estimate.base_minutes {
        let source = if estimate.base_from_table { "table" } else { "default" };
        println!("  base:      {base} min ({source})");
    }
    for stage in &estimate.stages {
        println!(
            "  {:<10} x{:<5} -> {} min",
            format!("{:?}", stage.stage),
            stage.factor,
            stage.minutes
        );
    }
    if estimate.clamped {
        println!("  clamped to {} min", estimate.minutes);
    }
}

pub fn run_compare(args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    let event_time = parse_event_time(args.at.as_deref())?;
    let config = load_config();
    let profile = config.profile.clone();
    let estimator = TravelTimeEstimator::new(config);

    let profile_view = (!args.no_profile).then_some(&profile as &dyn UserProfileView);
    let estimates = estimator.compare(&args.origin, &args.destination, event_time, profile_view);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimates)?);
        return Ok(());
    }

    println!("{}", "=".repeat(40));
    for estimate in &estimates {
        println!(
            "{:<18} {:>4} min  leave by {}",
            estimate.transport_method.label(),
            estimate.minutes,
            estimate.departure_time(event_time).format("%H:%M")
        );
    }
    println!("{}", "=".repeat(40));
    if let Some(fastest) = estimates.iter().min_by_key(|e| e.minutes) {
        println!("Fastest: {}", fastest.transport_method.label());
    }
    Ok(())
}
