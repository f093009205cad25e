use quizify::app_state::AppState;
use quizify::config::Config;
use quizify::errors::AppResult;
use quizify::host;

#[tokio::main]
async fn main() -> AppResult<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    config.warn_on_insecure_defaults();

    let state = AppState::new(config)?;
    host::run(state).await
}
