use clap::Parser;
use code_reviewer::core::controller::ReviewController;
use code_reviewer::domain::ports::ConfigProvider;
use code_reviewer::utils::logger;
use code_reviewer::{CliConfig, HttpReviewService, ReviewSettings, ReviewerError, SubmitOutcome};
use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is the normal case.
    let _ = dotenvy::dotenv();
    let config = CliConfig::parse();

    let result = match config.file.clone() {
        Some(path) => {
            logger::init_cli_logger(config.verbose);
            review_once(&config, &path).await
        }
        None => match logger::init_tui_logger(config.verbose, config.log_file.as_deref()) {
            Ok(()) => run_editor(&config),
            Err(e) => Err(ReviewerError::from(e)),
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            ExitCode::FAILURE
        }
    }
}

type HttpController = ReviewController<HttpReviewService<ReviewSettings>>;

fn build_controller(config: &CliConfig) -> code_reviewer::Result<(HttpController, String)> {
    let settings = config.settings()?;
    tracing::debug!("Resolved settings: {:?}", settings);
    let endpoint = settings.review_url();
    let service = HttpReviewService::new(settings)?;
    Ok((ReviewController::new(Arc::new(service)), endpoint))
}

fn run_editor(config: &CliConfig) -> code_reviewer::Result<ExitCode> {
    let (controller, endpoint) = build_controller(config)?;
    code_reviewer::tui::run_tui(controller, endpoint)?;
    Ok(ExitCode::SUCCESS)
}

async fn review_once(config: &CliConfig, path: &str) -> code_reviewer::Result<ExitCode> {
    let code = if path == "-" {
        let mut code = String::new();
        std::io::stdin().read_to_string(&mut code)?;
        code
    } else {
        std::fs::read_to_string(path)?
    };

    let (mut controller, endpoint) = build_controller(config)?;
    tracing::info!("Sending {} for review to {}", path, endpoint);
    controller.input_mut().set_text(code);

    let outcome = controller.submit().await;
    match outcome {
        SubmitOutcome::Skipped(_) => {
            eprintln!("❌ Nothing to review: {} is empty", path);
            Ok(ExitCode::from(1))
        }
        SubmitOutcome::Reviewed => {
            println!("{}", controller.output());
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Failed(kind) => {
            tracing::warn!("Review failed with {:?}", kind);
            println!("{}", controller.output());
            Ok(ExitCode::from(2))
        }
    }
}
