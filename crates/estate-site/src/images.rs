//! Property image normalization and fallbacks.

use estate_api::{ImageRef, Property, PropertyImage};

/// Gallery images in display order.
///
/// Bare URLs become records ordered by position, the first one primary.
/// Records are sorted by their `order` (stable for ties).
#[must_use]
pub fn gallery(property: &Property) -> Vec<PropertyImage> {
    let mut images: Vec<PropertyImage> = property
        .images
        .iter()
        .enumerate()
        .map(|(index, image)| match image {
            ImageRef::Url(url) => PropertyImage {
                id: 0,
                url: url.clone(),
                alt: None,
                order: u32::try_from(index).unwrap_or(u32::MAX),
                is_primary: index == 0,
            },
            ImageRef::Image(image) => image.clone(),
        })
        .filter(|image| !image.url.trim().is_empty())
        .collect();
    images.sort_by_key(|image| image.order);
    images
}

/// Main image URL: the flagged primary image, else the first gallery image,
/// else `featured_image`, else `placeholder`.
#[must_use]
pub fn primary_image(property: &Property, placeholder: &str) -> String {
    let images = gallery(property);
    images
        .iter()
        .find(|image| image.is_primary)
        .or_else(|| images.first())
        .map(|image| image.url.clone())
        .or_else(|| {
            property
                .featured_image
                .clone()
                .filter(|url| !url.trim().is_empty())
        })
        .unwrap_or_else(|| placeholder.to_owned())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(url: &str, order: u32, is_primary: bool) -> ImageRef {
        ImageRef::Image(PropertyImage {
            id: u64::from(order),
            url: url.to_owned(),
            alt: None,
            order,
            is_primary,
        })
    }

    #[test]
    fn test_string_images_normalized() {
        let mut property = Property::new(1, "Loft");
        property.images = vec![
            ImageRef::Url("/a.jpg".to_owned()),
            ImageRef::Url("/b.jpg".to_owned()),
        ];
        let images = gallery(&property);
        assert_eq!(images.len(), 2);
        assert!(images[0].is_primary);
        assert_eq!(images[1].order, 1);
        assert!(!images[1].is_primary);
    }

    #[test]
    fn test_records_sorted_by_order() {
        let mut property = Property::new(1, "Loft");
        property.images = vec![record("/b.jpg", 2, false), record("/a.jpg", 1, false)];
        let urls: Vec<String> = gallery(&property).into_iter().map(|i| i.url).collect();
        assert_eq!(urls, vec!["/a.jpg", "/b.jpg"]);
    }

    #[test]
    fn test_primary_flag_wins() {
        let mut property = Property::new(1, "Loft");
        property.images = vec![record("/a.jpg", 1, false), record("/b.jpg", 2, true)];
        assert_eq!(primary_image(&property, "/p.svg"), "/b.jpg");
    }

    #[test]
    fn test_first_image_without_flag() {
        let mut property = Property::new(1, "Loft");
        property.images = vec![record("/a.jpg", 1, false), record("/b.jpg", 2, false)];
        assert_eq!(primary_image(&property, "/p.svg"), "/a.jpg");
    }

    #[test]
    fn test_featured_then_placeholder() {
        let mut property = Property::new(1, "Loft");
        assert_eq!(primary_image(&property, "/p.svg"), "/p.svg");
        property.featured_image = Some("/f.jpg".to_owned());
        assert_eq!(primary_image(&property, "/p.svg"), "/f.jpg");
    }
}
