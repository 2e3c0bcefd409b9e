/// Identifies an outbound request within one channel.
///
/// Sequence numbers only grow, so the latest issued ticket is always the
/// one with the highest `seq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    pub seq: u64,
    /// Selection projection the request was issued for.
    pub snapshot: K,
}

/// Issues tickets for one request channel and decides which responses may land.
///
/// A response is accepted only while its ticket is the most recent one issued
/// and the state it was issued for still matches the current state.
#[derive(Debug)]
pub struct RequestTracker<K> {
    next_seq: u64,
    latest: Option<u64>,
    _snapshot: std::marker::PhantomData<K>,
}

impl<K> Default for RequestTracker<K> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            latest: None,
            _snapshot: std::marker::PhantomData,
        }
    }
}

impl<K: PartialEq> RequestTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, snapshot: K) -> Ticket<K> {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest = Some(seq);
        Ticket { seq, snapshot }
    }

    pub fn is_latest(&self, ticket: &Ticket<K>) -> bool {
        self.latest == Some(ticket.seq)
    }

    /// `true` if a response for `ticket` may be applied given `current` state.
    pub fn accepts(&self, ticket: &Ticket<K>, current: Option<&K>) -> bool {
        self.is_latest(ticket) && current == Some(&ticket.snapshot)
    }
}
