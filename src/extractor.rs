/// Effective bit layout of a generator, after configuration repair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdLayout {
    time_bits: u8,
    machine_bits: u8,
    sequence_bits: u8,
}

impl IdLayout {
    /// Caller guarantees each width is below 64 and the sum is at most 64
    pub(crate) const fn new(time_bits: u8, machine_bits: u8, sequence_bits: u8) -> Self {
        Self {
            time_bits,
            machine_bits,
            sequence_bits,
        }
    }

    #[inline(always)]
    pub const fn time_bits(&self) -> u8 {
        self.time_bits
    }

    #[inline(always)]
    pub const fn machine_bits(&self) -> u8 {
        self.machine_bits
    }

    #[inline(always)]
    pub const fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    /// Number of intervals before the generator expires (2^time_bits)
    #[inline(always)]
    pub const fn max_intervals(&self) -> u64 {
        1u64 << self.time_bits
    }

    /// Saturation point of the sequence field (2^sequence_bits - 1)
    #[inline(always)]
    pub const fn max_sequence(&self) -> u64 {
        (1u64 << self.sequence_bits) - 1
    }

    #[inline(always)]
    pub(crate) const fn machine_shift(&self) -> u32 {
        self.sequence_bits as u32
    }

    #[inline(always)]
    pub(crate) const fn interval_shift(&self) -> u32 {
        self.machine_bits as u32 + self.sequence_bits as u32
    }

    /// Pack interval, machine and sequence into one value, most significant first.
    /// Fields are not masked.
    #[inline(always)]
    pub const fn compose(&self, interval: u64, machine_id: u64, sequence: u64) -> u64 {
        (interval << self.interval_shift()) | (machine_id << self.machine_shift()) | sequence
    }
}

/// Splits packed ids back into their fields
#[derive(Debug, Copy, Clone)]
pub struct IdExtractor {
    layout: IdLayout,
}

impl IdExtractor {
    pub fn new(layout: IdLayout) -> Self {
        Self { layout }
    }

    #[inline(always)]
    fn mask(bits: u8) -> u64 {
        if bits >= 64 {
            u64::MAX
        } else {
            (1u64 << bits) - 1
        }
    }

    /// Extract the interval counter
    #[inline(always)]
    pub fn interval(&self, id: u64) -> u64 {
        (id >> self.layout.interval_shift()) & Self::mask(self.layout.time_bits)
    }

    /// Extract the machine identity
    #[inline(always)]
    pub fn machine(&self, id: u64) -> u64 {
        (id >> self.layout.machine_shift()) & Self::mask(self.layout.machine_bits)
    }

    /// Extract the sequence number
    #[inline(always)]
    pub fn sequence(&self, id: u64) -> u64 {
        id & Self::mask(self.layout.sequence_bits)
    }

    /// Decompose an id into interval, machine and sequence
    #[inline]
    pub fn decompose(&self, id: u64) -> (u64, u64, u64) {
        (self.interval(id), self.machine(id), self.sequence(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_default_layout() {
        let layout = IdLayout::new(38, 16, 10);
        assert_eq!(layout.compose(0, 1, 0), 1 << 10);
        // Sequence is not masked: 1024 spills into the machine field
        assert_eq!(layout.compose(9, 1, 1024), (9 << 26) | (1 << 10) | 1024);
    }

    #[test]
    fn test_decompose() {
        let layout = IdLayout::new(38, 16, 10);
        let extract = IdExtractor::new(layout);
        let id = layout.compose(0x1234567, 42, 123);

        assert_eq!(extract.interval(id), 0x1234567);
        assert_eq!(extract.machine(id), 42);
        assert_eq!(extract.sequence(id), 123);
        assert_eq!(extract.decompose(id), (0x1234567, 42, 123));
    }

    #[test]
    fn test_component_boundaries() {
        let layout = IdLayout::new(15, 5, 8);
        let extract = IdExtractor::new(layout);
        let id = layout.compose(layout.max_intervals() - 1, 31, layout.max_sequence());

        assert_eq!(extract.interval(id), (1 << 15) - 1);
        assert_eq!(extract.machine(id), 31);
        assert_eq!(extract.sequence(id), 255);
    }

    #[test]
    fn test_full_width_layout() {
        let layout = IdLayout::new(1, 0, 63);
        assert_eq!(layout.max_intervals(), 2);
        assert_eq!(layout.max_sequence(), (1u64 << 63) - 1);
        let extract = IdExtractor::new(layout);
        let id = layout.compose(1, 0, 5);
        assert_eq!(extract.decompose(id), (1, 0, 5));
    }
}
