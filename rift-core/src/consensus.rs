/// Three copies of the same thing that should agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replicas<T> {
    pub local: T,
    pub remote: T,
    pub archive: T,
}

impl<T: PartialEq> Replicas<T> {
    pub fn new(local: T, remote: T, archive: T) -> Self {
        Self {
            local,
            remote,
            archive,
        }
    }

    /// Number of equal pairs, 0 to 3. Two is impossible for an
    /// equivalence relation, so in practice this is 0, 1 or 3.
    pub fn agreement(&self) -> u8 {
        u8::from(self.local == self.remote)
            + u8::from(self.local == self.archive)
            + u8::from(self.remote == self.archive)
    }

    /// At least two agreeing pairs. With a transitive `==` that means all
    /// three replicas match; see `majority` for the two-of-three case.
    pub fn is_resolved(&self) -> bool {
        self.agreement() >= 2
    }

    /// The value held by at least two replicas.
    pub fn majority(&self) -> Option<&T> {
        if self.local == self.remote || self.local == self.archive {
            Some(&self.local)
        } else if self.remote == self.archive {
            Some(&self.remote)
        } else {
            None
        }
    }
}
