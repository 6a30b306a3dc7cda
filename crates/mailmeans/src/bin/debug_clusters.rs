use clap::Parser;
use mailmeans::debug_helpers::{init_tracing, load_documents, InputArgs};
use mailmeans::tokenize::{PorterStemmer, Tokenizer};
use mailmeans::vectorize::{VocabularyPolicy, Weighting};
use mailmeans::{cluster_emails_extra_debug, rng, summarize, ClusteringConfig};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};

#[derive(Parser)]
struct Args {
    #[command(flatten)]
    input: InputArgs,

    #[arg(short = 'k', long, default_value_t = mailmeans::DEFAULT_NUM_CLUSTERS)]
    clusters: usize,

    #[arg(long, default_value_t = mailmeans::DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    #[arg(long, default_value_t = mailmeans::DEFAULT_KEYWORDS_PER_CLUSTER)]
    keywords: usize,

    /// "full", "top" (100 terms) or "top:<n>"
    #[arg(long, default_value = "full")]
    vocabulary: VocabularyPolicy,

    /// "tfidf" or "tf"
    #[arg(long, default_value = "tfidf")]
    weighting: Weighting,

    /// Apply the English Porter stemmer
    #[arg(long)]
    stem: bool,

    /// Seed for k-means++; the library's fixed seed when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Print the clusters as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let documents = match load_documents(&args.input.input) {
        Ok(documents) => documents,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut tokenizer = Tokenizer::default();
    if args.stem {
        tokenizer = tokenizer.with_stemmer(PorterStemmer::new());
    }
    let config = ClusteringConfig::default()
        .with_num_clusters(args.clusters)
        .with_max_iterations(args.max_iterations)
        .with_keywords_per_cluster(args.keywords)
        .with_tokenizer(tokenizer)
        .with_vocabulary(args.vocabulary)
        .with_weighting(args.weighting);

    let t = Instant::now();
    let (clusters, debug_info) = match args.seed {
        Some(seed) => cluster_emails_extra_debug(&mut rng::from_seed(seed), &documents, &config),
        None => cluster_emails_extra_debug(&mut rng::new(), &documents, &config),
    };
    let elapsed = t.elapsed();

    info!(
        documents = documents.len(),
        vocabulary = debug_info.vocabulary_size,
        k = debug_info.k,
        iterations = debug_info.kmeans_loop_iterations,
        converged = debug_info.kmeans_converged,
        repaired = debug_info.kmeans_repaired,
        ?elapsed,
        "done"
    );

    if args.json {
        match serde_json::to_string_pretty(&clusters) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("could not serialize clusters: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    for cluster in &clusters {
        println!(
            "#{} {} ({} emails) [{}]",
            cluster.id,
            cluster.name,
            cluster.len(),
            cluster.keywords.join(", ")
        );
        for email in &cluster.emails {
            println!(
                "    {:<24} {}",
                summarize::sender_name(&email.from),
                email.subject
            );
        }
    }

    ExitCode::SUCCESS
}
