use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe topic trie with MQTT-style wildcards.
///
/// - `+` matches exactly one level
/// - `#` matches zero or more trailing levels (last segment only)
///
/// Used both for request routing and for state subscriptions.
///
/// ```ignore
/// let trie = Trie::new();
/// trie.insert("cart/state", 1);
/// trie.insert("cart/+", 2);
/// trie.insert("#", 3);
///
/// trie.match_topic("cart/state"); // [1, 2, 3] in some order
/// ```
pub struct Trie<T> {
    root: RwLock<Node<T>>,
}

struct Node<T> {
    literal: HashMap<String, Node<T>>,
    /// `+` child.
    one: Option<Box<Node<T>>>,
    /// Values registered with a trailing `#` at this level.
    rest: Vec<T>,
    /// Values whose pattern ends exactly here.
    here: Vec<T>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            literal: HashMap::new(),
            one: None,
            rest: Vec::new(),
            here: Vec::new(),
        }
    }
}

impl<T: Clone> Trie<T> {
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Node::default()),
        }
    }

    /// Register `value` under `pattern`.
    ///
    /// Segments after a `#` are ignored.
    pub fn insert(&self, pattern: &str, value: T) {
        let mut root = self.root.write().unwrap();
        let mut node = &mut *root;
        for segment in segments(pattern) {
            match segment {
                "#" => {
                    node.rest.push(value);
                    return;
                }
                "+" => node = node.one.get_or_insert_with(Default::default).as_mut(),
                literal => node = node.literal.entry(literal.to_string()).or_default(),
            }
        }
        node.here.push(value);
    }

    /// All values whose pattern matches the concrete `topic`.
    pub fn match_topic(&self, topic: &str) -> Vec<T> {
        let root = self.root.read().unwrap();
        let topic: Vec<&str> = segments(topic).collect();
        let mut out = Vec::new();
        collect(&root, &topic, &mut out);
        out
    }

    /// Remove every value under exactly `pattern` for which `predicate`
    /// returns true. Returns whether anything was removed.
    pub fn remove<F>(&self, pattern: &str, predicate: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let mut root = self.root.write().unwrap();
        let mut node = &mut *root;
        let mut trailing_hash = false;
        for segment in segments(pattern) {
            if segment == "#" {
                trailing_hash = true;
                break;
            }
            let next = match segment {
                "+" => node.one.as_deref_mut(),
                literal => node.literal.get_mut(literal),
            };
            match next {
                Some(child) => node = child,
                None => return false,
            }
        }
        let values = if trailing_hash {
            &mut node.rest
        } else {
            &mut node.here
        };
        let before = values.len();
        values.retain(|v| !predicate(v));
        values.len() < before
    }

    /// Whether any value is registered under exactly `pattern`.
    pub fn has_pattern(&self, pattern: &str) -> bool {
        let root = self.root.read().unwrap();
        let mut node = &*root;
        for segment in segments(pattern) {
            let next = match segment {
                "#" => return !node.rest.is_empty(),
                "+" => node.one.as_deref(),
                literal => node.literal.get(literal),
            };
            match next {
                Some(child) => node = child,
                None => return false,
            }
        }
        !node.here.is_empty()
    }
}

impl<T: Clone> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn collect<T: Clone>(node: &Node<T>, topic: &[&str], out: &mut Vec<T>) {
    // `#` covers the remainder, including zero levels.
    out.extend(node.rest.iter().cloned());

    let Some((head, tail)) = topic.split_first() else {
        out.extend(node.here.iter().cloned());
        return;
    };
    if let Some(child) = node.literal.get(*head) {
        collect(child, tail, out);
    }
    if let Some(child) = node.one.as_deref() {
        collect(child, tail, out);
    }
}

/// `""` has no segments; otherwise split on `/`.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|_| !path.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut v: Vec<i32>) -> Vec<i32> {
        v.sort();
        v
    }

    #[test]
    fn exact_match() {
        let trie = Trie::new();
        trie.insert("cart/state", 1);
        trie.insert("catalog/state", 2);

        assert_eq!(trie.match_topic("cart/state"), vec![1]);
        assert_eq!(trie.match_topic("catalog/state"), vec![2]);
        assert!(trie.match_topic("cart").is_empty());
        assert!(trie.match_topic("cart/state/extra").is_empty());
    }

    #[test]
    fn same_pattern_keeps_every_value() {
        let trie = Trie::new();
        trie.insert("cart/state", 1);
        trie.insert("cart/state", 2);

        assert_eq!(sorted(trie.match_topic("cart/state")), vec![1, 2]);
    }

    #[test]
    fn plus_matches_exactly_one_level() {
        let trie = Trie::new();
        trie.insert("showcase/previews/items/+", 7);

        assert_eq!(trie.match_topic("showcase/previews/items/3"), vec![7]);
        assert!(trie.match_topic("showcase/previews/items").is_empty());
        assert!(trie.match_topic("showcase/previews/items/3/x").is_empty());
    }

    #[test]
    fn plus_in_the_middle() {
        let trie = Trie::new();
        trie.insert("+/state", 5);

        assert_eq!(trie.match_topic("cart/state"), vec![5]);
        assert_eq!(trie.match_topic("checkout/state"), vec![5]);
        assert!(trie.match_topic("cart/items").is_empty());
    }

    #[test]
    fn hash_matches_zero_or_more_levels() {
        let trie = Trie::new();
        trie.insert("showcase/#", 9);

        assert_eq!(trie.match_topic("showcase"), vec![9]);
        assert_eq!(trie.match_topic("showcase/state"), vec![9]);
        assert_eq!(trie.match_topic("showcase/previews/items/1"), vec![9]);
        assert!(trie.match_topic("catalog/state").is_empty());
    }

    #[test]
    fn root_hash_matches_everything() {
        let trie = Trie::new();
        trie.insert("#", 1);

        assert_eq!(trie.match_topic("app/route"), vec![1]);
        assert_eq!(trie.match_topic("a/b/c/d"), vec![1]);
    }

    #[test]
    fn overlapping_patterns_all_match() {
        let trie = Trie::new();
        trie.insert("cart/state", 1);
        trie.insert("cart/+", 2);
        trie.insert("cart/#", 3);
        trie.insert("#", 4);
        trie.insert("catalog/#", 5);

        assert_eq!(sorted(trie.match_topic("cart/state")), vec![1, 2, 3, 4]);
    }

    #[test]
    fn remove_by_predicate() {
        let trie = Trie::new();
        trie.insert("cart/state", 1);
        trie.insert("cart/state", 2);

        assert!(trie.remove("cart/state", |v| *v == 1));
        assert_eq!(trie.match_topic("cart/state"), vec![2]);
    }

    #[test]
    fn remove_wildcards() {
        let trie = Trie::new();
        trie.insert("cart/+", 1);
        trie.insert("cart/#", 2);

        assert!(trie.remove("cart/+", |_| true));
        assert!(trie.remove("cart/#", |_| true));
        assert!(trie.match_topic("cart/state").is_empty());
    }

    #[test]
    fn remove_unknown_pattern_is_false() {
        let trie: Trie<i32> = Trie::new();
        assert!(!trie.remove("nowhere/at/all", |_| true));
        assert!(!trie.remove("#", |_| true));
    }

    #[test]
    fn has_pattern_is_exact() {
        let trie = Trie::new();
        trie.insert("catalog/load", 1);
        trie.insert("checkout/#", 2);

        assert!(trie.has_pattern("catalog/load"));
        assert!(trie.has_pattern("checkout/#"));
        assert!(!trie.has_pattern("catalog"));
        assert!(!trie.has_pattern("checkout/submit"));
    }

    #[test]
    fn empty_topic_only_matches_root_values() {
        let trie = Trie::new();
        trie.insert("", 1);
        trie.insert("#", 2);
        trie.insert("cart", 3);

        assert_eq!(sorted(trie.match_topic("")), vec![1, 2]);
    }
}
