//! Location hints used for same-location detection.

use clap::Subcommand;
use traveltime_core::EstimatorConfig;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the stored profile
    Show,
    /// Update one or more locations (pass "" to clear)
    Set {
        #[arg(long)]
        home: Option<String>,
        #[arg(long)]
        work: Option<String>,
        #[arg(long)]
        university: Option<String>,
    },
}

fn clearable(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProfileAction::Show => {
            let config = EstimatorConfig::load()?;
            println!("{}", serde_json::to_string_pretty(&config.profile)?);
        }
        ProfileAction::Set {
            home,
            work,
            university,
        } => {
            if home.is_none() && work.is_none() && university.is_none() {
                return Err("nothing to set: pass --home, --work or --university".into());
            }
            let mut config = EstimatorConfig::load()?;
            if let Some(home) = home {
                config.profile.location = clearable(home);
            }
            if let Some(work) = work {
                config.profile.work_location = clearable(work);
            }
            if let Some(university) = university {
                config.profile.university_location = clearable(university);
            }
            config.save()?;
            println!("{}", serde_json::to_string_pretty(&config.profile)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_clear() {
        assert_eq!(clearable("  ".into()), None);
        assert_eq!(clearable(" Acme ".into()), Some("Acme".into()));
    }
}
