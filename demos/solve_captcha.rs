//! Example: Solving an image captcha through rucaptcha.
//!
//! Run with: RUCAPTCHA_API_KEY=... cargo run --example solve_captcha [image]

use rucaptcha_solver::{Solver, SolverConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for debug output (optional)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Wikipedia's sample captcha unless a path, URL or base64 string is given
    let image = std::env::args().nth(1).unwrap_or_else(|| {
        "https://upload.wikimedia.org/wikipedia/commons/6/69/Captcha.jpg".to_string()
    });

    let solver = Solver::from_config(Some(SolverConfig::from_env()?))?;

    println!("Balance: {}", solver.balance().await?);

    match solver.solve(image).await {
        Ok(result) => {
            println!("Success!");
            println!("  id: {}", result.id);
            println!("  answer: {}", result.answer);
        }
        Err(e) => {
            println!("Failed: {}", e);
        }
    }

    Ok(())
}
