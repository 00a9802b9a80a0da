use std::collections::HashMap;

use ngram_trie::trie::{NgramTrie, VocabIndex};
use unicode_segmentation::UnicodeSegmentation;

// Hands out symbol ids for words, in order of first appearance
#[derive(Default)]
struct Vocab {
    ids: HashMap<String, VocabIndex>,
    words: Vec<String>,
}

impl Vocab {
    fn index(&mut self, word: &str) -> VocabIndex {
        let word = word.to_lowercase();
        if let Some(&id) = self.ids.get(&word) {
            return id;
        }
        let id = self.words.len() as VocabIndex;
        self.ids.insert(word.clone(), id);
        self.words.push(word);
        id
    }

    fn words(&self, ids: &[VocabIndex]) -> Vec<&str> {
        ids.iter().map(|&id| self.words[id as usize].as_str()).collect()
    }
}

fn main() {
    let text = "The quick brown fox jumps over the lazy dog. \
                The lazy dog sleeps. The quick brown fox runs.";

    let mut vocab = Vocab::default();
    let mut trie: NgramTrie = NgramTrie::new();

    for sentence in text.unicode_sentences() {
        let ids: Vec<VocabIndex> = sentence.unicode_words().map(|w| vocab.index(w)).collect();
        *trie.root_count_mut() += ids.len() as u64;
        trie.count_sequence(&ids, 3, 1)
            .expect("vocabulary never hands out the sentinel");
    }

    println!("tokens: {:?}", trie.root_count());
    for order in 1..=trie.max_order() {
        println!("{}-grams: {}", order, trie.num_ngrams(order).unwrap_or(0));
        for kv_pair in trie.ngrams(order).expect("order fits a key buffer") {
            if *kv_pair.value > 1 {
                println!("  {} {}", vocab.words(&kv_pair.key).join(" "), kv_pair.value);
            }
        }
    }
}
