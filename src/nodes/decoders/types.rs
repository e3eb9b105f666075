//! Common decoder types and enums

/// PRBS feedback polynomial
///
/// The discriminant is the polynomial degree, which is also the number of
/// seed bits a checker needs before it can predict the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polynomial {
    /// x^7 + x^6 + 1
    Prbs7 = 7,
    /// x^9 + x^5 + 1
    Prbs9 = 9,
    /// x^11 + x^9 + 1
    Prbs11 = 11,
    /// x^15 + x^14 + 1
    Prbs15 = 15,
    /// x^23 + x^18 + 1
    Prbs23 = 23,
    /// x^31 + x^28 + 1
    Prbs31 = 31,
}

impl Polynomial {
    pub const ALL: [Polynomial; 6] = [
        Polynomial::Prbs7,
        Polynomial::Prbs9,
        Polynomial::Prbs11,
        Polynomial::Prbs15,
        Polynomial::Prbs23,
        Polynomial::Prbs31,
    ];

    /// Parameter code for this polynomial
    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    /// Number of state bits
    pub fn degree(self) -> usize {
        self as usize
    }

    /// Parameter label, e.g. "PRBS-7"
    pub fn label(self) -> &'static str {
        match self {
            Polynomial::Prbs7 => "PRBS-7",
            Polynomial::Prbs9 => "PRBS-9",
            Polynomial::Prbs11 => "PRBS-11",
            Polynomial::Prbs15 => "PRBS-15",
            Polynomial::Prbs23 => "PRBS-23",
            Polynomial::Prbs31 => "PRBS-31",
        }
    }

    /// Compact name used in filter names, e.g. "PRBS7"
    pub fn short_name(self) -> &'static str {
        match self {
            Polynomial::Prbs7 => "PRBS7",
            Polynomial::Prbs9 => "PRBS9",
            Polynomial::Prbs11 => "PRBS11",
            Polynomial::Prbs15 => "PRBS15",
            Polynomial::Prbs23 => "PRBS23",
            Polynomial::Prbs31 => "PRBS31",
        }
    }

    /// Bit positions XORed to form the next bit (bit 0 = most recent)
    fn taps(self) -> (u32, u32) {
        match self {
            Polynomial::Prbs7 => (6, 5),
            Polynomial::Prbs9 => (8, 4),
            Polynomial::Prbs11 => (10, 8),
            Polynomial::Prbs15 => (14, 13),
            Polynomial::Prbs23 => (22, 17),
            Polynomial::Prbs31 => (30, 27),
        }
    }

    /// Advance the LFSR one step and return the new bit
    ///
    /// The new bit is shifted into the LSB of `state`.
    #[inline]
    pub fn run(self, state: &mut u32) -> bool {
        let (a, b) = self.taps();
        let next = ((*state >> a) ^ (*state >> b)) & 1;
        *state = (*state << 1) | next;
        next == 1
    }
}

/// Generate `count` PRBS bits starting from `seed`
///
/// `seed` must have at least one of its low `degree` bits set, otherwise the
/// sequence is all zeros.
pub fn generate(poly: Polynomial, seed: u32, count: usize) -> Vec<bool> {
    let mut state = seed;
    (0..count).map(|_| poly.run(&mut state)).collect()
}
