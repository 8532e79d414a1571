use serde_json::Number;

/// Payload of an undirected edge: the connection strength plus its label as written in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub weight: f64,
    pub label: String,
}

impl Link {
    /// Keeps the input's spelling for the label, so `5` stays `5` and `5.0` stays `5.0`.
    pub fn from_number(number: &Number) -> Option<Self> {
        let weight = number.as_f64()?;
        Some(Link {
            weight,
            label: number.to_string(),
        })
    }
}

#[cfg(test)]
impl Link {
    /// Label is the shortest decimal form of the weight (`7`, `0.25`).
    pub fn new(weight: f64) -> Self {
        Link {
            weight,
            label: weight.to_string(),
        }
    }
}
