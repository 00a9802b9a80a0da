use ngram_trie::trie::{NgramTrie, VocabIndex};
use rand::{thread_rng, Rng};

fn main() {
    static POPULATION_SIZE: usize = 10;
    static SIZE: usize = 12;
    static ORDER: usize = 3;

    // Create our trie
    let mut trie: NgramTrie = NgramTrie::new();

    // Count the unigrams, bigrams and trigrams of 10 random
    // sequences of symbol ids drawn from a 4 symbol vocabulary.
    for _i in 0..POPULATION_SIZE {
        let sequence: Vec<VocabIndex> = (0..thread_rng().gen_range(1..=SIZE))
            .map(|_| thread_rng().gen_range(0..4))
            .collect();
        println!("sequence: {:?}", sequence);
        trie.count_sequence(&sequence, ORDER, 1)
            .expect("sequence contains no sentinel");
    }

    // Walk each order in turn, reading the key buffer and count
    for order in 1..=trie.max_order() {
        println!("order {}", order);
        let mut ngrams = trie.ngrams(order).expect("order fits a key buffer");
        while let Some(count) = ngrams.advance() {
            println!("key: {:?}, count: {}", ngrams.current_key(), count);
        }
    }

    // Drop every bigram count seen only once to zero
    let mut cursor = trie.cursor(2).expect("order fits a key buffer");
    while let Some((key, count)) = cursor.next_entry() {
        if *count == 1 {
            println!("zeroing: {:?}", key);
            *count = 0;
        }
    }
}
