//! Mock identification catalog
//!
//! Fixed table of identifiable Pokémon. Built once at startup, shared
//! read-only by all requests, never mutated or persisted.

use serde::Serialize;

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub image: String,
}

impl Pokemon {
    fn new(id: u32, name: &str, types: &[&str]) -> Self {
        Self {
            id,
            name: name.to_string(),
            types: types.iter().map(ToString::to_string).collect(),
            image: format!(
                "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/{id}.png"
            ),
        }
    }
}

/// Build the fixed catalog
pub fn catalog() -> Vec<Pokemon> {
    vec![
        Pokemon::new(25, "Pikachu", &["Electric"]),
        Pokemon::new(1, "Bulbasaur", &["Grass", "Poison"]),
        Pokemon::new(4, "Charmander", &["Fire"]),
        Pokemon::new(7, "Squirtle", &["Water"]),
        Pokemon::new(143, "Snorlax", &["Normal"]),
    ]
}
