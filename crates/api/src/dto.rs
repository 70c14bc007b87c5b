//! Wire shapes of the Discogs list endpoints and their mapping to
//! [`ReleaseModel`] rows.
//!
//! Every field is `#[serde(default)]`: Discogs omits keys freely and a
//! missing artist or label must not fail the whole page.

use discotui_types::ReleaseModel;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
    pub items: u32,
}

/// One custom collection field (`field_id` 1 = media, 2 = sleeve, 3 = notes).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FieldNote {
    pub field_id: u32,
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Format {
    pub name: String,
    pub qty: String,
    pub text: String,
    pub descriptions: Vec<String>,
}

impl Format {
    fn render(&self) -> String {
        format!("{}x {}: {}", self.qty, self.name, self.descriptions.join("-"))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Named {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BasicInformation {
    pub id: u64,
    pub title: String,
    pub year: u32,
    pub thumb: String,
    pub cover_image: String,
    pub formats: Vec<Format>,
    pub artists: Vec<Named>,
    pub labels: Vec<Named>,
    pub genres: Vec<String>,
    pub styles: Vec<String>,
}

impl BasicInformation {
    /// Fields shared by collection and wishlist rows.
    fn to_model(&self, rating: u8) -> ReleaseModel {
        ReleaseModel {
            title: self.title.clone(),
            rating,
            year: self.year,
            artist: first_name(&self.artists),
            label: first_name(&self.labels),
            genre: self.genres.join(", "),
            style: self.styles.join(", "),
            thumb_url: self.thumb.clone(),
            format: self
                .formats
                .iter()
                .map(Format::render)
                .collect::<Vec<_>>()
                .join("\n\t"),
            ..ReleaseModel::default()
        }
    }
}

fn first_name(list: &[Named]) -> String {
    list.first().map(|n| n.name.clone()).unwrap_or_default()
}

/// A collection or wishlist entry. `N` is the shape of `notes`, which
/// differs between the two endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Release<N: Default> {
    pub id: u64,
    pub instance_id: u64,
    pub rating: u8,
    pub date_added: String,
    pub notes: N,
    pub basic_information: BasicInformation,
}

impl Release<Vec<FieldNote>> {
    #[must_use]
    pub fn to_model(&self) -> ReleaseModel {
        let mut model = self.basic_information.to_model(self.rating);
        for note in &self.notes {
            match note.field_id {
                1 => model.media_condition.clone_from(&note.value),
                2 => model.sleeve_condition.clone_from(&note.value),
                3 => model.note.clone_from(&note.value),
                _ => {}
            }
        }
        model
    }
}

impl Release<String> {
    #[must_use]
    pub fn to_model(&self) -> ReleaseModel {
        ReleaseModel {
            note: self.notes.clone(),
            ..self.basic_information.to_model(self.rating)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Seller {
    pub id: u64,
    pub username: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ItemRelease {
    pub id: u64,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderItem {
    pub id: u64,
    pub release: ItemRelease,
    pub media_condition: String,
    pub sleeve_condition: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Order {
    pub id: String,
    pub status: String,
    pub created: String,
    pub seller: Seller,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// One row per ordered item.
    #[must_use]
    pub fn to_models(&self) -> Vec<ReleaseModel> {
        self.items
            .iter()
            .map(|item| ReleaseModel {
                title: item.release.description.clone(),
                label: self.seller.username.clone(),
                media_condition: item.media_condition.clone(),
                sleeve_condition: item.sleeve_condition.clone(),
                note: format!("Order {}: {}", self.id, self.status),
                ..ReleaseModel::default()
            })
            .collect()
    }
}

/// A paginated list response.
pub trait Page: serde::de::DeserializeOwned {
    fn pagination(&self) -> &Pagination;
    fn into_models(self) -> Vec<ReleaseModel>;
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CollectionPage {
    pub pagination: Pagination,
    pub releases: Vec<Release<Vec<FieldNote>>>,
}

impl Page for CollectionPage {
    fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    fn into_models(self) -> Vec<ReleaseModel> {
        self.releases.iter().map(Release::<Vec<FieldNote>>::to_model).collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WantsPage {
    pub pagination: Pagination,
    pub wants: Vec<Release<String>>,
}

impl Page for WantsPage {
    fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    fn into_models(self) -> Vec<ReleaseModel> {
        self.wants.iter().map(Release::<String>::to_model).collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrdersPage {
    pub pagination: Pagination,
    pub orders: Vec<Order>,
}

impl Page for OrdersPage {
    fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    fn into_models(self) -> Vec<ReleaseModel> {
        self.orders.iter().flat_map(Order::to_models).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn basic() -> serde_json::Value {
        json!({
            "id": 1,
            "title": "Blue Train",
            "year": 1958,
            "thumb": "https://i.discogs.com/t.jpg",
            "artists": [{"id": 10, "name": "John Coltrane"}, {"id": 11, "name": "Lee Morgan"}],
            "labels": [{"id": 20, "name": "Blue Note", "catno": "BLP 1577"}],
            "genres": ["Jazz"],
            "styles": ["Hard Bop", "Modal"],
            "formats": [
                {"name": "Vinyl", "qty": "1", "descriptions": ["LP", "Album", "Mono"]},
                {"name": "CD", "qty": "2", "descriptions": []}
            ]
        })
    }

    #[test]
    fn test_collection_mapping() {
        let page: CollectionPage = serde_json::from_value(json!({
            "pagination": {"page": 1, "pages": 1, "per_page": 50, "items": 1},
            "releases": [{
                "id": 1,
                "rating": 4,
                "notes": [
                    {"field_id": 1, "value": "Near Mint (NM or M-)"},
                    {"field_id": 2, "value": "Very Good Plus (VG+)"},
                    {"field_id": 3, "value": "first pressing"},
                    {"field_id": 9, "value": "ignored"}
                ],
                "basic_information": basic()
            }]
        }))
        .unwrap();
        let rows = page.into_models();
        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.title, "Blue Train");
        assert_eq!(r.rating, 4);
        assert_eq!(r.year, 1958);
        assert_eq!(r.artist, "John Coltrane");
        assert_eq!(r.label, "Blue Note");
        assert_eq!(r.genre, "Jazz");
        assert_eq!(r.style, "Hard Bop, Modal");
        assert_eq!(r.format, "1x Vinyl: LP-Album-Mono\n\t2x CD: ");
        assert_eq!(r.media_condition, "Near Mint (NM or M-)");
        assert_eq!(r.sleeve_condition, "Very Good Plus (VG+)");
        assert_eq!(r.note, "first pressing");
        assert_eq!(r.thumb_url, "https://i.discogs.com/t.jpg");
    }

    #[test]
    fn test_wishlist_mapping_uses_string_notes() {
        let page: WantsPage = serde_json::from_value(json!({
            "pagination": {"page": 1, "pages": 1},
            "wants": [{"rating": 0, "notes": "grail", "basic_information": basic()}]
        }))
        .unwrap();
        let rows = page.into_models();
        assert_eq!(rows[0].note, "grail");
        assert_eq!(rows[0].artist, "John Coltrane");
        assert!(rows[0].media_condition.is_empty());
    }

    #[test]
    fn test_empty_artists_and_labels_do_not_panic() {
        let page: WantsPage = serde_json::from_value(json!({
            "wants": [{"basic_information": {"title": "Untitled", "artists": [], "labels": []}}]
        }))
        .unwrap();
        let rows = page.into_models();
        assert_eq!(rows[0].title, "Untitled");
        assert_eq!(rows[0].artist, "");
        assert_eq!(rows[0].label, "");
        assert_eq!(rows[0].format, "");
    }

    #[test]
    fn test_orders_flatten_items() {
        let page: OrdersPage = serde_json::from_value(json!({
            "pagination": {"page": 1, "pages": 1},
            "orders": [{
                "id": "1234-5",
                "status": "Shipped",
                "seller": {"id": 3, "username": "recordshop"},
                "items": [
                    {"id": 1, "release": {"id": 7, "description": "Coltrane - Blue Train"},
                     "media_condition": "Mint (M)", "sleeve_condition": "Generic"},
                    {"id": 2, "release": {"id": 8, "description": "Davis - Kind Of Blue"}}
                ]
            }, {
                "id": "1234-6", "status": "New Order", "items": []
            }]
        }))
        .unwrap();
        let rows = page.into_models();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Coltrane - Blue Train");
        assert_eq!(rows[0].label, "recordshop");
        assert_eq!(rows[0].note, "Order 1234-5: Shipped");
        assert_eq!(rows[0].media_condition, "Mint (M)");
        assert_eq!(rows[1].title, "Davis - Kind Of Blue");
    }
}
