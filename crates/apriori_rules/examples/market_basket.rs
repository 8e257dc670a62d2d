use apriori_rules::estimator::AssociationMiner;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn market_basket() -> Vec<Vec<&'static str>> {
    vec![
        vec!["milk", "bread", "butter"],
        vec!["bread", "diapers", "beer"],
        vec!["milk", "diapers", "beer", "bread"],
        vec!["bread", "butter"],
        vec!["milk", "bread", "diapers", "beer"],
        vec!["milk", "butter"],
        vec!["beer", "diapers"],
        vec!["milk", "bread", "beer"],
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let transactions = market_basket();
    let start = Instant::now();
    let report = AssociationMiner::default().mine_transactions(&transactions)?;
    println!("Mined in {:?}", start.elapsed());

    println!("\nMinimum support: {}", report.min_support);
    println!("\nFrequent itemsets:");
    println!("{}", report.frequent_itemsets.to_dataframe()?);

    println!("\nRanked rules:");
    println!("{}", report.rules.to_dataframe()?);

    println!("\nRule graph edges:");
    for edge in report.rule_edges() {
        println!("  {} -> {} (lift {:.3})", edge.source, edge.target, edge.weight);
    }
    Ok(())
}
