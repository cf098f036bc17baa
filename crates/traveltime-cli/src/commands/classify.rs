use clap::Args;

use traveltime_core::{TravelTimeEstimator, UserProfileView};

use crate::common::load_config;

#[derive(Args)]
pub struct ClassifyArgs {
    #[arg(long = "from")]
    pub origin: String,
    #[arg(long = "to")]
    pub destination: String,
    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ClassifyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();
    let profile = config.profile.clone();
    let estimator = TravelTimeEstimator::new(config);
    let classifier = estimator.classifier();

    let (category, rule) = classifier.classify_with_rule(&args.origin, &args.destination);
    let same_location = classifier.is_same_location(
        &args.origin,
        &args.destination,
        Some(&profile as &dyn UserProfileView),
    );

    if args.json {
        let output = serde_json::json!({
            "category": category,
            "rule": rule,
            "same_location": same_location,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("category:      {category}");
        println!("rule:          {rule:?}");
        println!("same location: {same_location}");
    }
    Ok(())
}
