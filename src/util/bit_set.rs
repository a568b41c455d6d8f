use std::iter::{Copied, FusedIterator};

/// Fixed-capacity set of integers in `0..capacity`, packed into 64-bit words.
///
/// Indices passed to [`insert`], [`remove`] and [`contains`] must be below
/// the capacity. This is only checked in debug builds: an index inside the
/// last word but past the capacity silently breaks [`count`] and
/// [`is_disjoint`], and an index past the last word panics on slice access.
///
/// [`insert`]: Self::insert
/// [`remove`]: Self::remove
/// [`contains`]: Self::contains
/// [`count`]: Self::count
/// [`is_disjoint`]: Self::is_disjoint
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub struct PackedBitSet {
    capacity: usize,
    words: Vec<u64>,
}

impl PackedBitSet {
    pub fn new(capacity: usize, fill: bool) -> Self {
        let mut result = Self {
            capacity,
            words: vec![0; word_count(capacity)],
        };
        if fill {
            result.fill(true);
        }
        result
    }

    pub fn empty(capacity: usize) -> Self {
        Self::new(capacity, false)
    }

    pub fn filled(capacity: usize) -> Self {
        Self::new(capacity, true)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn words(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    pub fn insert(&mut self, index: usize) {
        self.debug_check(index);
        let (word, mask) = location(index);
        self.words[word] |= mask;
    }

    #[inline]
    pub fn remove(&mut self, index: usize) {
        self.debug_check(index);
        let (word, mask) = location(index);
        self.words[word] &= !mask;
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.debug_check(index);
        let (word, mask) = location(index);
        self.words[word] & mask != 0
    }

    /// Sets or clears every slot. Bits past the capacity stay clear.
    pub fn fill(&mut self, value: bool) {
        if !value {
            self.words.fill(0);
            return;
        }

        self.words.fill(u64::MAX);
        let tail = self.capacity % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last = (1 << tail) - 1;
            }
        }
    }

    pub fn any(&self) -> bool {
        self.words.iter().any(|&word| word != 0)
    }

    pub fn count(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Returns `true` if no word of `self` intersects the word at the same
    /// position in `other`.
    ///
    /// Only the common prefix of both word arrays is compared, so a longer
    /// set may hold elements past the end of a shorter one and still be
    /// reported as disjoint from it.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(&other.words)
            .all(|(&a, &b)| a & b == 0)
    }

    /// Ascending iterator over the elements of the set.
    pub fn iter(&self) -> Ones<'_> {
        Bits::new(self.words.iter().copied())
    }

    /// Ascending iterator over the elements of `self` which are not in
    /// `other`. Words of `self` past the end of `other` are yielded whole.
    pub fn difference<'a>(&'a self, other: &'a Self) -> Difference<'a> {
        Bits::new(DifferenceWords {
            left: self.words.iter(),
            right: other.words.iter(),
        })
    }

    #[inline(always)]
    fn debug_check(&self, index: usize) {
        debug_assert!(
            index < self.capacity,
            "index {index} is out of range for a set of capacity {}",
            self.capacity
        );
    }
}

impl Extend<usize> for PackedBitSet {
    fn extend<T: IntoIterator<Item = usize>>(&mut self, iter: T) {
        for index in iter {
            self.insert(index);
        }
    }
}

impl<'a> IntoIterator for &'a PackedBitSet {
    type Item = usize;
    type IntoIter = Ones<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for PackedBitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

pub type Ones<'a> = Bits<Copied<std::slice::Iter<'a, u64>>>;

pub type Difference<'a> = Bits<DifferenceWords<'a>>;

/// Yields the positions of set bits in a stream of words.
#[derive(Clone)]
pub struct Bits<I> {
    words: I,
    word: u64,
    offset: usize,
    next_offset: usize,
}

impl<I> Bits<I> {
    fn new(words: I) -> Self {
        Self {
            words,
            word: 0,
            offset: 0,
            next_offset: 0,
        }
    }
}

impl<I: Iterator<Item = u64>> Iterator for Bits<I> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.word == 0 {
            self.word = self.words.next()?;
            self.offset = self.next_offset;
            self.next_offset += WORD_BITS;
        }

        let bit = self.word.trailing_zeros() as usize;
        // clear the lowest set bit
        self.word &= self.word - 1;
        Some(self.offset + bit)
    }
}

impl<I: FusedIterator<Item = u64>> FusedIterator for Bits<I> {}

#[derive(Clone)]
pub struct DifferenceWords<'a> {
    left: std::slice::Iter<'a, u64>,
    right: std::slice::Iter<'a, u64>,
}

impl Iterator for DifferenceWords<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let left = *self.left.next()?;
        Some(match self.right.next() {
            Some(&right) => left & !right,
            None => left,
        })
    }
}

impl FusedIterator for DifferenceWords<'_> {}

#[inline]
fn location(index: usize) -> (usize, u64) {
    (index / WORD_BITS, 1 << (index % WORD_BITS))
}

fn word_count(capacity: usize) -> usize {
    capacity.div_ceil(WORD_BITS)
}

const WORD_BITS: usize = u64::BITS as usize;
