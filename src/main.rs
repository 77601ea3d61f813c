use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookline_agent::application::{AfterSalesService, FaqStore, SupportPipeline};
use bookline_agent::infrastructure::{
    AppConfig, CsvFaqLoader, JsonBookingStore, OpenAiEmbedding, OpenAiLlm, QdrantVectorIndex,
    SupportAgent,
};

#[derive(Parser)]
#[command(name = "bookline", about = "Bookline customer support agent")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the FAQ source file and index it into the vector store
    Ingest,
    /// Answer a question through the retrieval pipeline
    Ask { question: String },
    /// Show raw similarity matches for a query, without the language model
    Search {
        query: String,
        #[arg(long, default_value = "3")]
        k: usize,
    },
    /// Send one message through the tool-calling support agent
    Chat { message: String },
    /// Change the departure time of a booking
    Reschedule { booking_id: String, new_time: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookline_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Commands::Ingest => {
            let pipeline = build_pipeline(&config).await?;
            let count = pipeline.setup_data().await?;
            println!("Indexed {count} FAQ entries");
        }
        Commands::Ask { question } => {
            let pipeline = build_pipeline(&config).await?;
            let result = pipeline.query(&question).await;
            println!("{}", result.answer);
            if result.num_sources > 0 {
                println!();
                println!("Sources ({}):", result.num_sources);
                for (i, source) in result.sources.iter().enumerate() {
                    println!("  {}. {}", i + 1, source.content);
                }
            }
        }
        Commands::Search { query, k } => {
            let pipeline = build_pipeline(&config).await?;
            let results = pipeline.search_similar(&query, k).await;
            if results.is_empty() {
                println!("No matches");
            }
            for result in results {
                println!("{:.3}  {}", result.score, result.document.content);
            }
        }
        Commands::Chat { message } => {
            let pipeline = build_pipeline(&config).await?;
            let after_sales = build_after_sales(&config).await?;
            let agent = SupportAgent::new(pipeline, after_sales, &config);
            let reply = agent.respond(&message).await?;
            println!("{reply}");
        }
        Commands::Reschedule {
            booking_id,
            new_time,
        } => {
            let after_sales = build_after_sales(&config).await?;
            let outcome = after_sales
                .change_departure_time(&booking_id, &new_time)
                .await?;
            println!("{}", outcome.render());
        }
    }

    Ok(())
}

async fn build_pipeline(config: &AppConfig) -> anyhow::Result<Arc<SupportPipeline>> {
    let index = QdrantVectorIndex::connect(
        &config.qdrant.url,
        &config.qdrant.collection,
        config.embedding.dimension,
    )
    .await?;
    let timeout = Duration::from_secs(config.llm.timeout_seconds);
    let embedding = OpenAiEmbedding::from_config(&config.embedding, timeout);
    let store = Arc::new(FaqStore::new(Arc::new(embedding), Arc::new(index))?);

    let pipeline = SupportPipeline::new(
        CsvFaqLoader::new(&config.data.faq_path),
        store,
        Arc::new(OpenAiLlm::from_config(&config.llm)),
        &config.prompts.answer_template,
        config.retrieval.top_k,
    )?;
    Ok(Arc::new(pipeline))
}

async fn build_after_sales(config: &AppConfig) -> anyhow::Result<Arc<AfterSalesService>> {
    let store = JsonBookingStore::open(&config.data.bookings_path).await?;
    Ok(Arc::new(AfterSalesService::new(Arc::new(store))))
}
