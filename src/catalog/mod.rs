//! # Catalog
//!
//! Read-only restaurant and menu data. The marketplace ships with a static demo
//! catalog; anything that implements [`Catalog`] can replace it.

use crate::model::{MenuItem, Restaurant};
use rust_decimal::Decimal;

/// Source of restaurants and their menus.
pub trait Catalog: Send + Sync {
    fn list_restaurants(&self) -> Vec<Restaurant>;

    /// The menu of `restaurant_id`; empty for unknown restaurants.
    fn list_menu_items(&self, restaurant_id: &str) -> Vec<MenuItem>;

    fn restaurant(&self, restaurant_id: &str) -> Option<Restaurant> {
        self.list_restaurants()
            .into_iter()
            .find(|r| r.id == restaurant_id)
    }

    /// Restaurants whose name or category contains `term`, ignoring case. An
    /// empty term matches everything.
    fn search(&self, term: &str) -> Vec<Restaurant> {
        let needle = term.to_lowercase();
        self.list_restaurants()
            .into_iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&needle)
                    || r.category.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Groups menu items by category, categories in first-seen order.
pub fn group_by_category(items: Vec<MenuItem>) -> Vec<(String, Vec<MenuItem>)> {
    let mut groups: Vec<(String, Vec<MenuItem>)> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|(category, _)| *category == item.category) {
            Some((_, members)) => members.push(item),
            None => groups.push((item.category.clone(), vec![item])),
        }
    }
    groups
}

/// The built-in demo catalog: four restaurants sharing one menu.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    restaurants: Vec<Restaurant>,
    menu: Vec<MenuItem>,
}

impl StaticCatalog {
    pub fn new(restaurants: Vec<Restaurant>, menu: Vec<MenuItem>) -> Self {
        Self { restaurants, menu }
    }

    pub fn demo() -> Self {
        let restaurant = |id: &str, name: &str, category: &str, rating: i64, time: &str, fee: i64| {
            Restaurant {
                id: id.to_string(),
                name: name.to_string(),
                category: category.to_string(),
                rating: Decimal::new(rating, 1),
                delivery_time: time.to_string(),
                delivery_fee: Some(Decimal::new(fee, 2)),
            }
        };
        let dish = |id: &str, name: &str, description: &str, cents: i64, category: &str| MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price: Decimal::new(cents, 2),
            category: category.to_string(),
        };

        Self::new(
            vec![
                restaurant("rest-1", "Pizzaria Bella Napoli", "Italiana", 48, "30-40 min", 500),
                restaurant("rest-2", "Sushi Master", "Japonesa", 49, "40-50 min", 800),
                restaurant("rest-3", "Burger House", "Hamburguer", 47, "25-35 min", 400),
                restaurant("rest-4", "Taco Loco", "Mexicana", 46, "35-45 min", 600),
            ],
            vec![
                dish(
                    "item-1",
                    "Pizza Margherita",
                    "Molho de tomate, mussarela, manjericão fresco",
                    4590,
                    "Pizzas",
                ),
                dish(
                    "item-2",
                    "Pizza Calabresa",
                    "Calabresa, cebola, azeitonas, mussarela",
                    4890,
                    "Pizzas",
                ),
                dish(
                    "item-3",
                    "Lasanha Bolonhesa",
                    "Massa fresca, molho bolonhesa, queijo gratinado",
                    3890,
                    "Massas",
                ),
                dish(
                    "item-4",
                    "Tiramisu",
                    "Sobremesa italiana clássica com café e mascarpone",
                    1890,
                    "Sobremesas",
                ),
            ],
        )
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::demo()
    }
}

impl Catalog for StaticCatalog {
    fn list_restaurants(&self) -> Vec<Restaurant> {
        self.restaurants.clone()
    }

    fn list_menu_items(&self, restaurant_id: &str) -> Vec<MenuItem> {
        if self.restaurants.iter().any(|r| r.id == restaurant_id) {
            self.menu.clone()
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_matches_name_or_category() {
        let catalog = StaticCatalog::demo();

        let names = |term: &str| -> Vec<String> {
            catalog.search(term).into_iter().map(|r| r.name).collect()
        };
        assert_eq!(names("SUSHI"), ["Sushi Master"]);
        assert_eq!(names("italiana"), ["Pizzaria Bella Napoli"]);
        assert_eq!(names("").len(), 4);
        assert!(names("churrasco").is_empty());
    }

    #[test]
    fn test_menu_grouped_in_first_seen_order() {
        let catalog = StaticCatalog::demo();
        let groups = group_by_category(catalog.list_menu_items("rest-1"));

        let categories: Vec<&str> = groups.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(categories, ["Pizzas", "Massas", "Sobremesas"]);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn test_unknown_restaurant_has_no_menu() {
        let catalog = StaticCatalog::demo();
        assert!(catalog.list_menu_items("rest-99").is_empty());
        assert!(catalog.restaurant("rest-99").is_none());
        assert_eq!(
            catalog.restaurant("rest-2").and_then(|r| r.delivery_fee),
            Some(Decimal::new(800, 2))
        );
    }
}
