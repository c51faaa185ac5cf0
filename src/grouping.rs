// src/grouping.rs
//! Topic grouping: one linear pass, first-occurrence group order, input order
//! inside each group.

use std::collections::HashMap;

use serde::Serialize;

use crate::article::Article;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicGroup {
    pub topic: String,
    pub articles: Vec<Article>,
}

/// Group articles by [`Article::topic_key`].
pub fn group_by_topic(articles: Vec<Article>) -> Vec<TopicGroup> {
    let mut groups: Vec<TopicGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for article in articles {
        let key = article.topic_key();
        match index.get(key) {
            Some(&i) => groups[i].articles.push(article),
            None => {
                let topic = key.to_string();
                index.insert(topic.clone(), groups.len());
                groups.push(TopicGroup {
                    topic,
                    articles: vec![article],
                });
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn art(title: &str, topic: Option<&str>) -> Article {
        Article {
            title: title.into(),
            url: format!("http://example.com/{title}"),
            summary: String::new(),
            topic: topic.map(str::to_string),
            audio: None,
        }
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_by_topic(vec![]).is_empty());
    }

    #[test]
    fn groups_follow_first_occurrence() {
        let groups = group_by_topic(vec![
            art("1", Some("world")),
            art("2", Some("tech")),
            art("3", None),
            art("4", Some("world")),
            art("5", Some("")),
            art("6", Some("tech")),
        ]);

        let topics: Vec<&str> = groups.iter().map(|g| g.topic.as_str()).collect();
        assert_eq!(topics, vec!["world", "tech", "other"]);

        let titles = |i: usize| -> Vec<&str> {
            groups[i].articles.iter().map(|a| a.title.as_str()).collect()
        };
        assert_eq!(titles(0), vec!["1", "4"]);
        assert_eq!(titles(1), vec!["2", "6"]);
        assert_eq!(titles(2), vec!["3", "5"]);
    }

    #[test]
    fn topics_are_case_sensitive() {
        let groups = group_by_topic(vec![art("a", Some("Tech")), art("b", Some("tech"))]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].topic, "Tech");
        assert_eq!(groups[1].topic, "tech");
    }

    #[test]
    fn explicit_other_merges_with_missing_topic() {
        let groups = group_by_topic(vec![art("a", None), art("b", Some("other"))]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].articles.len(), 2);
    }
}
