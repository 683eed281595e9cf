/// Generator of sequential net names, such as `IN_000`, `IN_001`, ...
///
/// ```
/// # use crossnet::crossbar::NetNamer;
/// let mut nets = NetNamer::new("COL_", 3);
/// assert_eq!(nets.next().unwrap(), "COL_000");
/// assert_eq!(nets.next().unwrap(), "COL_001");
///
/// let odd: Vec<_> = NetNamer::new("n", 0).starting_at(1).with_step(2).take(3).collect();
/// assert_eq!(odd, vec!["n1", "n3", "n5"]);
/// ```
#[derive(Clone, Debug)]
pub struct NetNamer {
    prefix: String,
    width: usize,
    next: usize,
    step: usize,
}

impl NetNamer {
    /// Create a generator with indices zero-padded to `width` digits, starting at 0
    pub fn new(prefix: impl Into<String>, width: usize) -> Self {
        NetNamer {
            prefix: prefix.into(),
            width,
            next: 0,
            step: 1,
        }
    }

    /// Start at a given index
    pub fn starting_at(mut self, start: usize) -> Self {
        self.next = start;
        self
    }

    /// Use a given step between indices
    pub fn with_step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    /// Name of the net at a given index
    pub fn name(&self, index: usize) -> String {
        format!("{}{:0width$}", self.prefix, index, width = self.width)
    }
}

impl Iterator for NetNamer {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let ret = self.name(self.next);
        self.next += self.step;
        Some(ret)
    }
}

/// The first `n` nets with this prefix, numbered on three digits
pub fn nets(prefix: &str, n: usize) -> Vec<String> {
    NetNamer::new(prefix, 3).take(n).collect()
}
