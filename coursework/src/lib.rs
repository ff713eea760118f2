//! Standalone coursework exercises: arithmetic, list filtering, a book
//! record and word counting.

use std::collections::HashMap;

pub fn add_numbers(a: f64, b: f64) -> f64 {
    a + b
}

/// An element of a loosely typed input list.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
    /// Never counted, even if it looks numeric.
    Text(String),
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl From<&str> for Number {
    fn from(value: &str) -> Self {
        Number::Text(value.to_string())
    }
}

/// Even values of `numbers`, with floats truncated toward zero first.
pub fn filter_even_numbers(numbers: &[Number]) -> Vec<i64> {
    numbers
        .iter()
        .filter_map(|n| match n {
            Number::Int(i) => Some(*i),
            Number::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Number::Float(_) | Number::Text(_) => None,
        })
        .filter(|n| n % 2 == 0)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub pages: u32,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, pages: u32) -> Self {
        Self { title: title.into(), author: author.into(), pages }
    }

    pub fn info(&self) -> String {
        format!("Title: {}, Author: {}", self.title, self.author)
    }

    /// More than 300 pages.
    pub fn is_long(&self) -> bool {
        self.pages > 300
    }
}

/// Lowercased whitespace-separated words and how often each occurs.
/// Punctuation stays attached, so `"world,"` and `"world"` differ.
pub fn count_word_occurrences(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for word in text.split_whitespace() {
        *counts.entry(word.to_lowercase()).or_insert(0) += 1;
    }
    counts
}
