/*!
The structure region backing a parsed document.

One contiguous word allocation serves as two stacks growing toward each
other: the forward cursor holds open-container scratch frames, the backward
cursor holds finished values. The gap between the cursors is the remaining
headroom; they never cross.

[`AllocationStrategy`] picks between provisioning the worst case up front
and growing on demand. Growth keeps the low block at the low end and the
high block at the high end, which is exactly what the parser's offset
encodings rely on.
*/

/**
How the structure region is provisioned for a parse.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStrategy {
    /**
    Allocate one word per input byte up front.

    Legal input can never outgrow that bound, so no mid-parse growth ever
    happens; the cost is that peak memory is proportional to the input even
    for documents with little structure.
    */
    Single,
    /**
    Start small and double the region whenever it runs out.

    Peak memory tracks the document's actual structure at the cost of
    copying the region while it grows.
    */
    Dynamic,
}

/**
The region could not be provisioned or grown.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NoSpace;

const DYNAMIC_INITIAL_WORDS: usize = 128;

#[derive(Debug)]
pub(crate) struct Structure {
    words: Vec<usize>,
    write: usize,
    out: usize,
    dynamic: bool,
}

impl Structure {
    pub(crate) fn for_input(
        strategy: AllocationStrategy,
        input_len: usize,
    ) -> Result<Self, NoSpace> {
        match strategy {
            AllocationStrategy::Single => Structure::with_words(input_len, false),
            AllocationStrategy::Dynamic => {
                Structure::with_words(DYNAMIC_INITIAL_WORDS.min(input_len), true)
            }
        }
    }

    fn with_words(len: usize, dynamic: bool) -> Result<Self, NoSpace> {
        let mut words = Vec::new();
        words.try_reserve_exact(len).map_err(|_| NoSpace)?;
        words.resize(len, 0);

        Ok(Structure {
            words,
            write: 0,
            out: len,
            dynamic,
        })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub(crate) fn write(&self) -> usize {
        self.write
    }

    #[inline]
    pub(crate) fn out(&self) -> usize {
        self.out
    }

    #[inline]
    pub(crate) fn words(&self) -> &[usize] {
        &self.words
    }

    #[inline]
    pub(crate) fn words_mut(&mut self) -> &mut [usize] {
        &mut self.words
    }

    /**
    Ensure there's room for `extra` more words between the cursors.
    */
    #[inline]
    pub(crate) fn reserve(&mut self, extra: usize) -> Result<(), NoSpace> {
        if self.out - self.write >= extra {
            return Ok(());
        }

        if !self.dynamic {
            return Err(NoSpace);
        }

        self.grow(extra)
    }

    #[cold]
    fn grow(&mut self, extra: usize) -> Result<(), NoSpace> {
        let high = self.words.len() - self.out;
        let required = self
            .write
            .checked_add(high)
            .and_then(|used| used.checked_add(extra))
            .ok_or(NoSpace)?;

        let mut grown_len = self.words.len().max(DYNAMIC_INITIAL_WORDS);
        while grown_len < required {
            grown_len = grown_len.checked_mul(2).ok_or(NoSpace)?;
        }

        let mut grown = Vec::new();
        grown.try_reserve_exact(grown_len).map_err(|_| NoSpace)?;
        grown.resize(grown_len, 0);

        // the scratch stack keeps its offsets from the low end and the arena
        // keeps its offsets from the high end, so nothing needs rewriting
        grown[..self.write].copy_from_slice(&self.words[..self.write]);
        grown[grown_len - high..].copy_from_slice(&self.words[self.out..]);

        self.out = grown_len - high;
        self.words = grown;

        Ok(())
    }

    /**
    Append a word at the forward cursor.

    The word must have been reserved.
    */
    #[inline]
    pub(crate) fn push(&mut self, word: usize) {
        test_assert!(self.write < self.out);

        *get_unchecked_mut!(self.words, self.write) = word;
        self.write += 1;
    }

    /**
    Append a word at the backward cursor.

    The word must have been reserved.
    */
    #[inline]
    pub(crate) fn emit(&mut self, word: usize) {
        test_assert!(self.out > self.write);

        self.out -= 1;
        *get_unchecked_mut!(self.words, self.out) = word;
    }

    /**
    Claim a block of `len` words at the backward cursor.

    The block must have been reserved.
    */
    #[inline]
    pub(crate) fn emit_block(&mut self, len: usize) -> &mut [usize] {
        test_assert!(self.out - self.write >= len);

        self.out -= len;
        let out = self.out;

        get_unchecked_mut!(self.words, out..out + len)
    }

    #[inline]
    pub(crate) fn set_write(&mut self, write: usize) {
        test_assert!(write <= self.out);

        self.write = write;
    }

    #[inline]
    pub(crate) fn set_out(&mut self, out: usize) {
        test_assert!(out >= self.write);
        test_assert!(out <= self.words.len());

        self.out = out;
    }

    /**
    Release the region into the finished document.
    */
    pub(crate) fn into_words(self) -> Box<[usize]> {
        self.words.into_boxed_slice()
    }
}
