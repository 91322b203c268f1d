//! Domain types for pokedeck
//! Defines the core data structures shared by the list, detail and team features.

pub mod error;
pub mod favorite;
pub mod list;
pub mod pokemon;
pub mod team;

pub use error::*;
pub use favorite::*;
pub use list::*;
pub use pokemon::*;
pub use team::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_sort_order_display_parse() {
        assert_eq!(SortOrder::ByNameDescending.to_string(), "name-desc");
        assert_eq!(SortOrder::from_str("NAME").unwrap(), SortOrder::ByNameAscending);
        assert_eq!(SortOrder::from_str("id").unwrap(), SortOrder::ById);
        assert!(SortOrder::from_str("weight").is_err());
    }

    #[test]
    fn test_type_match_display_parse() {
        assert_eq!(TypeMatch::All.to_string(), "all");
        assert_eq!(TypeMatch::from_str("ANY").unwrap(), TypeMatch::Any);
        assert!(TypeMatch::from_str("some").is_err());
    }

    #[test]
    fn test_display_name_capitalizes_first_letter() {
        assert_eq!(display_name("bulbasaur"), "Bulbasaur");
        assert_eq!(display_name("mr-mime"), "Mr-mime");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_summary_image_url_is_derived_from_id() {
        let summary = PokemonSummary::new(25, "Pikachu", vec!["electric".into()]);
        assert_eq!(
            summary.image_url,
            "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/25.png"
        );
        assert!(!summary.is_favorite);
    }

    #[test]
    fn test_filter_criteria_activity() {
        assert!(!FilterCriteria::default().is_active());
        assert!(!FilterCriteria::search("   ").is_active());
        assert!(FilterCriteria::search("pika").is_active());
        assert!(FilterCriteria::types(["fire"]).is_active());
        assert!(FilterCriteria::favorites().is_active());
    }

    #[test]
    fn test_page_window_has_more() {
        let mut window = PageWindow::new(20);
        assert!(!window.has_more());
        window.total_count = 45;
        window.offset = 40;
        assert!(window.has_more());
        window.offset = 45;
        assert!(!window.has_more());
        assert_eq!(PageWindow::new(0).limit, 1);
    }

    #[test]
    fn test_team_capacity() {
        let mut team = PokemonTeam {
            id: "t".into(),
            name: "Kanto".into(),
            description: String::new(),
            pokemons: Vec::new(),
            created_at: "now".into(),
            updated_at: "now".into(),
        };
        for id in 1..=MAX_TEAM_SIZE as u32 {
            assert!(!team.is_full());
            let mut member = TeamPokemon::from(&PokemonSummary::new(id, "P", vec![]));
            member.order = id - 1;
            team.pokemons.push(member);
        }
        assert!(team.is_full());
        assert!(team.contains(3));
        assert!(!team.contains(7));
    }
}
