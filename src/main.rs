//! `quizrag` command-line entrypoint.
//!
//! Usage: `quizrag <class_id> <subject_id> <chapter_id> [num_questions]`
//!
//! Prints the retrieved quiz context as JSON. `--health-check` only checks that Qdrant is reachable.

use anyhow::{Context, bail};
use mimalloc::MiMalloc;

use quizrag::config::Config;
use quizrag::embedding::{Embedder, LazyEmbedder};
use quizrag::quiz::{QuizContextService, QuizRequest};
use quizrag::retrieval::Retriever;
use quizrag::store::{ChapterKey, QdrantPassageStore};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: quizrag <class_id> <subject_id> <chapter_id> [num_questions]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = Config::from_env()?;
    config.validate()?;

    if args.iter().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check(&config).await);
    }

    let request = parse_request(&args)?;

    let store = QdrantPassageStore::new(&config.qdrant_url, config.collection.clone())?;
    let embedder = LazyEmbedder::global(&config.embedder());
    let retriever = Retriever::with_config(embedder, config.retrieval());

    tracing::info!(
        chapter = %request.key,
        num_questions = request.num_questions,
        qdrant_url = %config.qdrant_url,
        collection = %config.collection,
        stub = config.embedder_stub,
        "Retrieving quiz context"
    );

    let service = QuizContextService::new(store, retriever);
    let context = service.retrieve_context(&request).await?;

    tracing::debug!(
        embedding_dim = service.retriever().embedder().embedding_dim(),
        "Embedder ready"
    );

    println!("{}", serde_json::to_string_pretty(&context)?);
    Ok(())
}

fn parse_request(args: &[String]) -> anyhow::Result<QuizRequest> {
    let [class_id, subject_id, chapter_id, rest @ ..] = args else {
        bail!(USAGE);
    };

    let key = ChapterKey::new(class_id.as_str(), subject_id.as_str(), chapter_id.as_str());
    let request = match rest {
        [] => QuizRequest::new(key),
        [n] => {
            let n: usize = n
                .parse()
                .with_context(|| format!("num_questions must be a number, got '{n}'"))?;
            QuizRequest::new(key).with_num_questions(n)
        }
        _ => bail!(USAGE),
    };

    Ok(request)
}

async fn run_health_check(config: &Config) -> i32 {
    let store = match QdrantPassageStore::new(&config.qdrant_url, config.collection.clone()) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            return 1;
        }
    };

    match store.health_check().await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            1
        }
    }
}
