use std::process::ExitCode;

use estrada_survey::App;

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: estrada-survey <surveys.pb>");
        return ExitCode::FAILURE;
    };

    let app = match App::new() {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Unable to load settings: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("Unable to read {}: {}", path, err);
            return ExitCode::FAILURE;
        }
    };

    match app.decode_surveys(&bytes) {
        Ok(surveys) => {
            for survey in &surveys {
                println!(
                    "#{} {} [{}] surveyed {} by {}",
                    survey.id,
                    survey.road_code,
                    survey.chainage_interval(),
                    survey.date_surveyed_display().unwrap_or_else(|| "-".to_string()),
                    survey.added_by
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} is not a valid survey payload: {}", path, err);
            ExitCode::FAILURE
        }
    }
}
