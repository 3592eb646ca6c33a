//! Approximate read-mapping demo.
//!
//! Builds an FM-index over a small reference and searches a handful of patterns at increasing
//! edit-distance budgets, printing hit positions and CIGAR strings.
//!
//! ```bash
//! cargo run --example full_text_search
//! ```

use alice_readmap::index::preprocess;

fn main() {
    println!("=== alice-readmap FM-index demo ===\n");

    let text = b"the quick brown fox jumps over the lazy dog. \
                 the fox was quick and the dog was lazy. \
                 a quick brown dog outfoxed a lazy fox.";

    println!("Reference ({} bytes):", text.len());
    println!("  \"{}\"", std::str::from_utf8(text).unwrap());

    let index = preprocess(text);

    println!("\n--- Exact matches (k = 0) ---\n");
    for query in ["fox", "the", "quick", "lazy", "cat", "brown fox"] {
        let hits: Vec<_> = index.search(query.as_bytes(), 0).unwrap().collect();
        if hits.is_empty() {
            println!("  \"{query}\" -> not found");
        } else {
            let positions: Vec<u32> = hits.iter().map(|(pos, _)| *pos).collect();
            println!("  \"{query}\" -> {} occurrence(s) at {:?}", hits.len(), positions);
        }
    }

    println!("\n--- Approximate matches ---\n");
    for (query, k) in [("qiuck", 1), ("foxx", 1), ("lzy dog", 2), ("cat", 1)] {
        let hits: Vec<_> = index.search(query.as_bytes(), k).unwrap().collect();
        if hits.is_empty() {
            println!("  \"{query}\" (k={k}) -> not found");
        } else {
            for (pos, cigar) in &hits {
                println!("  \"{query}\" (k={k}) -> pos {pos}, cigar {cigar}");
            }
        }
    }
}
