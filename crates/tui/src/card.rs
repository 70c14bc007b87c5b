//! Text content of release cards and the detail view.

use discotui_types::ReleaseModel;

/// Body of a grid card.
#[must_use]
pub fn card_text(r: &ReleaseModel) -> String {
    format!(
        "{}\n{} | {} | {}\n{}\n\nCondition: {}\nSleeve Condition: {}\nGenre: {}\nStyle: {}",
        r.title,
        r.artist,
        r.year,
        r.label,
        r.format.replace('\t', "  "),
        r.media_condition,
        r.sleeve_condition,
        r.genre,
        r.style,
    )
}

/// Label/value rows for the detail modal. Empty values are skipped.
#[must_use]
pub fn detail_rows(r: &ReleaseModel) -> Vec<(&'static str, String)> {
    let rating = if r.rating == 0 {
        String::new()
    } else {
        format!("{}/5", r.rating)
    };
    let year = if r.year == 0 {
        String::new()
    } else {
        r.year.to_string()
    };
    [
        ("Title", r.title.clone()),
        ("Artist", r.artist.clone()),
        ("Year", year),
        ("Label", r.label.clone()),
        ("Format", r.format.replace("\n\t", "; ")),
        ("Genre", r.genre.clone()),
        ("Style", r.style.clone()),
        ("Condition", r.media_condition.clone()),
        ("Sleeve", r.sleeve_condition.clone()),
        ("Rating", rating),
        ("Notes", r.note.clone()),
        ("Thumbnail", r.thumb_url.clone()),
    ]
    .into_iter()
    .filter(|(_, v)| !v.is_empty())
    .collect()
}
