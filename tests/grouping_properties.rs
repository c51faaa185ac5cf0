//! Randomized checks of topic grouping over seeded article lists.
//!
//! For every generated input:
//! - the groups partition the input (same multiset, nothing duplicated)
//! - blank/missing topics land in "other"
//! - group order = first occurrence, in-group order = input order

use std::collections::{HashMap, HashSet};

use newslite::{group_by_topic, Article, OTHER_TOPIC};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

const TOPICS: &[&str] = &["tech", "Tech", "world", "sport", "other", "science"];

fn random_articles(rng: &mut StdRng, n: usize) -> Vec<Article> {
    (0..n)
        .map(|i| {
            let topic = match rng.random_range(0..10) {
                0 => None,
                1 => Some(String::new()),
                2 => Some("  ".to_string()),
                _ => Some(TOPICS[rng.random_range(0..TOPICS.len())].to_string()),
            };
            Article {
                // index in title keeps every article distinguishable
                title: format!("article-{i}"),
                url: format!("http://example.com/{i}"),
                summary: String::new(),
                topic,
                audio: rng.random_bool(0.3).then(|| format!("http://example.com/{i}.mp3")),
            }
        })
        .collect()
}

fn expected_key(a: &Article) -> &str {
    match a.topic.as_deref() {
        None => OTHER_TOPIC,
        Some(t) if t.trim().is_empty() => OTHER_TOPIC,
        Some(t) => t,
    }
}

#[test]
fn grouping_partitions_input_in_order() {
    let mut rng = StdRng::seed_from_u64(0x6e65_7773);

    for round in 0..200 {
        let n = rng.random_range(0..40);
        let mut input = random_articles(&mut rng, n);
        input.shuffle(&mut rng);

        let groups = group_by_topic(input.clone());

        // partition: total count and uniqueness
        let total: usize = groups.iter().map(|g| g.articles.len()).sum();
        assert_eq!(total, input.len(), "round {round}: article count changed");
        let mut seen = HashSet::new();
        for g in &groups {
            for a in &g.articles {
                assert!(seen.insert(a.title.clone()), "round {round}: duplicate {}", a.title);
            }
        }

        // no two groups share a key
        let keys: HashSet<&str> = groups.iter().map(|g| g.topic.as_str()).collect();
        assert_eq!(keys.len(), groups.len(), "round {round}: duplicate group keys");

        // group order = first occurrence of each key
        let mut first_seen: Vec<&str> = Vec::new();
        for a in &input {
            let k = expected_key(a);
            if !first_seen.contains(&k) {
                first_seen.push(k);
            }
        }
        let order: Vec<&str> = groups.iter().map(|g| g.topic.as_str()).collect();
        assert_eq!(order, first_seen, "round {round}: group order");

        // in-group order = input order, and each article sits under its key
        let position: HashMap<&str, usize> = input
            .iter()
            .enumerate()
            .map(|(i, a)| (a.title.as_str(), i))
            .collect();
        for g in &groups {
            let idx: Vec<usize> = g.articles.iter().map(|a| position[a.title.as_str()]).collect();
            assert!(idx.windows(2).all(|w| w[0] < w[1]), "round {round}: order in {}", g.topic);
            assert!(g.articles.iter().all(|a| expected_key(a) == g.topic));
        }
    }
}

#[test]
fn no_group_is_ever_blank() {
    let mut rng = StdRng::seed_from_u64(7);
    let groups = group_by_topic(random_articles(&mut rng, 500));
    assert!(groups.iter().all(|g| !g.topic.trim().is_empty()));
    assert!(groups.iter().any(|g| g.topic == OTHER_TOPIC));
}
