use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_LINKS: [&str; 6] = [
    "https://pointerpointer.com/",
    "https://cat-bounce.com/",
    "https://longdogechallenge.com/",
    "https://checkboxrace.com/",
    "https://pixelsfighting.com/",
    "https://puginarug.com/",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistractionLinks {
    links: Vec<String>,
}

impl Default for DistractionLinks {
    fn default() -> Self {
        Self {
            links: DEFAULT_LINKS.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl DistractionLinks {
    pub fn new(links: Vec<String>) -> Self {
        let links: Vec<String> = links
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        if links.is_empty() {
            Self::default()
        } else {
            Self { links }
        }
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.links
            .choose(rng)
            .map(String::as_str)
            .unwrap_or(DEFAULT_LINKS[0])
    }

    pub fn as_slice(&self) -> &[String] {
        &self.links
    }
}
