use docker_subnet_pool::config;
use docker_subnet_pool::derive_address_pools;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    // usage: docker-subnet-pool [network] [--output text|json]
    let args = config::parse_args(std::env::args().skip(1))?;

    let pools = derive_address_pools(None, &args.network).await?;

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&pools)?),
        "text" => {
            for pool in &pools {
                println!("{pool}");
            }
        }
        other => return Err(format!("unknown output format {other:?}").into()),
    }

    Ok(())
}
