use clap::Parser;

#[derive(Parser)]
#[command(name = "hello-client")]
#[command(about = "Send a greeting to a hello-silo host", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    /// Text to send as the greeting.
    greeting: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/Hello", cli.url.trim_end_matches('/')))
        .query(&[("Greeting", cli.greeting.as_str())])
        .send()
        .await
        .map_err(|e| {
            eprintln!("Error: request failed: {}", e);
            e
        })?;

    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: host returned status {}", status);
        eprintln!("{}", body);
        std::process::exit(1);
    }

    println!("{}", body);
    Ok(())
}
