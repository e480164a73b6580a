use crate::models::Book;

/// Count of records per distinct key, kept in the order each key was first
/// seen. Lookups scan linearly; catalogs are small.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<K> {
    entries: Vec<(K, usize)>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> Tally<K> {
    /// Count one occurrence of `key`.
    pub fn record(&mut self, key: K) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((key, 1)),
        }
    }

    /// Count for `key`, or zero when it never occurred.
    pub fn get(&self, key: &K) -> usize {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

impl<K> Tally<K> {
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Percentage of the total held by `count`, in `0.0..=100.0`.
    pub fn share(&self, count: usize) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / total as f64
        }
    }
}

impl<K: PartialEq> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Self::default();
        for key in iter {
            tally.record(key);
        }
        tally
    }
}

/// Number of books per genre, in first-occurrence order.
pub fn count_by_genre(books: &[Book]) -> Tally<String> {
    books.iter().map(|book| book.genre.clone()).collect()
}

/// Number of books per publication year, in first-occurrence order.
pub fn count_by_year(books: &[Book]) -> Tally<i32> {
    books.iter().map(|book| book.year).collect()
}
