//! Demo price dataset grouped by area

use std::collections::BTreeMap;

use crate::models::{ProductListing, StorePrice};

fn listing(product_id: &str, name: &str, category: &str, prices: &[(&str, f64)]) -> ProductListing {
    ProductListing {
        product_id: product_id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        prices: prices
            .iter()
            .map(|(store_name, price)| StorePrice {
                store_name: store_name.to_string(),
                price: *price,
            })
            .collect(),
    }
}

pub fn demo_areas() -> BTreeMap<String, Vec<ProductListing>> {
    BTreeMap::from([
        (
            "downtown".to_string(),
            vec![
                listing(
                    "coffee-beans-1kg",
                    "Premium Coffee Beans 1kg",
                    "Grocery",
                    &[
                        ("Bean Palace", 17.5),
                        ("SuperMart Central", 16.99),
                        ("Budget Grocers", 15.75),
                    ],
                ),
                listing(
                    "almond-milk-1l",
                    "Organic Almond Milk 1L",
                    "Dairy Alternatives",
                    &[("SuperMart Central", 4.69), ("Budget Grocers", 3.99)],
                ),
                listing(
                    "dish-soap-500ml",
                    "Eco Dish Soap 500ml",
                    "Household",
                    &[("HomeEssentials", 2.5), ("Budget Grocers", 2.19)],
                ),
            ],
        ),
        (
            "uptown".to_string(),
            vec![
                listing(
                    "coffee-beans-1kg",
                    "Premium Coffee Beans 1kg",
                    "Grocery",
                    &[("Cafe Collective", 18.0), ("Uptown Organics", 17.25)],
                ),
                listing(
                    "oat-milk-1l",
                    "Oat Milk 1L",
                    "Dairy Alternatives",
                    &[("Uptown Organics", 4.5), ("Healthy Harvest", 4.35)],
                ),
                listing(
                    "granola-500g",
                    "Crunchy Granola 500g",
                    "Grocery",
                    &[
                        ("Healthy Harvest", 5.95),
                        ("SuperMart Uptown", 5.5),
                        ("Uptown Organics", 5.75),
                    ],
                ),
            ],
        ),
    ])
}
