//! Fixed sample catalogs inserted into empty collections.

use crate::models::music::CreateMusicTrack;
use crate::models::photo::CreatePhoto;

fn photo(
    title: &str,
    label: &str,
    message: &str,
    category: &str,
    color: &str,
    order: i32,
    images: &[&str],
) -> CreatePhoto {
    CreatePhoto {
        title: Some(title.to_string()),
        label: Some(label.to_string()),
        message: Some(message.to_string()),
        photos: Some(images.iter().map(|s| s.to_string()).collect()),
        main_image: images.first().map(|s| s.to_string()),
        color: Some(color.to_string()),
        category: Some(category.to_string()),
        order: Some(order),
    }
}

/// Sample gallery entries, one per display slot.
pub fn photo_catalog() -> Vec<CreatePhoto> {
    vec![
        photo(
            "First Bloom",
            "Spring",
            "The first roses of the season, still wet with morning dew.",
            "roses",
            "#e8a0b4",
            1,
            &["rose-1.jpg", "rose-2.jpg", "rose-3.jpg"],
        ),
        photo(
            "Garden Walk",
            "Roses",
            "A slow afternoon between the hedges.",
            "roses",
            "#c94f6d",
            2,
            &["garden-1.jpg", "garden-2.jpg"],
        ),
        photo(
            "Quiet Lake",
            "Nature",
            "Still water and a sky that would not stop changing.",
            "nature",
            "#7fb7be",
            3,
            &["lake-1.jpg", "lake-2.jpg", "lake-3.jpg"],
        ),
        photo(
            "City Lights",
            "Urban",
            "Late trains, neon, and the walk home.",
            "urban",
            "#f2c14e",
            4,
            &["city-1.jpg", "city-2.jpg"],
        ),
    ]
}

fn track(
    title: &str,
    artist: &str,
    filename: &str,
    category: &str,
    duration: i32,
    description: &str,
) -> CreateMusicTrack {
    CreateMusicTrack {
        title: Some(title.to_string()),
        artist: Some(artist.to_string()),
        filename: Some(filename.to_string()),
        category: Some(category.to_string()),
        duration: Some(duration),
        description: Some(description.to_string()),
    }
}

/// Sample playlist, in natural playback order.
pub fn music_catalog() -> Vec<CreateMusicTrack> {
    vec![
        track(
            "Petals",
            "Unknown Artist",
            "petals.mp3",
            "romantic",
            214,
            "Soft piano for the gallery intro.",
        ),
        track(
            "Evening Light",
            "Unknown Artist",
            "evening-light.mp3",
            "calm",
            187,
            "Acoustic guitar and strings.",
        ),
        track(
            "Grace",
            "Unknown Artist",
            "grace.mp3",
            "romantic",
            242,
            "The closing song.",
        ),
    ]
}
