//! User-facing text tables.

use serde::{Deserialize, Serialize};

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Turkish.
    Tr,
}

impl Locale {
    /// Returns the message table for this locale.
    #[must_use]
    pub const fn messages(self) -> &'static Messages {
        match self {
            Self::En => &EN,
            Self::Tr => &TR,
        }
    }
}

/// Static message table. One instance per [`Locale`].
#[derive(Debug)]
pub struct Messages {
    /// Navigation: home tab.
    pub nav_home: &'static str,
    /// Navigation: search tab.
    pub nav_search: &'static str,
    /// Navigation: favorites tab.
    pub nav_favorites: &'static str,

    /// Home row titles.
    pub row_trending: &'static str,
    /// Home row titles.
    pub row_now_playing: &'static str,
    /// Home row titles.
    pub row_popular: &'static str,
    /// Home row titles.
    pub row_top_rated: &'static str,
    /// Home row titles.
    pub row_upcoming: &'static str,
    /// Shown while a request is in flight.
    pub loading: &'static str,
    /// A home row or list failed to load.
    pub list_load_failed: &'static str,

    /// Detail view failed to load.
    pub detail_load_failed: &'static str,
    /// Detail view for an unknown id.
    pub movie_not_found: &'static str,
    /// Fallback action label.
    pub back_to_home: &'static str,
    /// Detail section headings and labels.
    pub overview_heading: &'static str,
    /// Overview fallback.
    pub no_overview: &'static str,
    /// Detail section headings and labels.
    pub genres_heading: &'static str,
    /// Detail section headings and labels.
    pub info_heading: &'static str,
    /// Detail section headings and labels.
    pub original_title: &'static str,
    /// Detail section headings and labels.
    pub status: &'static str,
    /// Detail section headings and labels.
    pub original_language: &'static str,
    /// Detail section headings and labels.
    pub production_companies: &'static str,
    /// Detail section headings and labels.
    pub cast_heading: &'static str,
    /// Detail section headings and labels.
    pub trailer_heading: &'static str,
    /// No trailer among the videos.
    pub no_trailer: &'static str,
    /// Detail section headings and labels.
    pub reviews_heading: &'static str,
    /// No reviews for the movie.
    pub no_reviews: &'static str,
    /// Detail section headings and labels.
    pub similar_heading: &'static str,
    /// Favorite toggle label when not in the list.
    pub add_to_list: &'static str,
    /// Favorite toggle label when in the list.
    pub in_list: &'static str,
    /// Missing value placeholder.
    pub not_available: &'static str,
    /// Runtime hour suffix.
    pub hour_suffix: &'static str,
    /// Runtime minute suffix.
    pub minute_suffix: &'static str,

    /// Search view title.
    pub search_title: &'static str,
    /// Search input placeholder.
    pub search_placeholder: &'static str,
    /// Initial search state heading.
    pub search_start_title: &'static str,
    /// Initial search state hint.
    pub search_start_hint: &'static str,
    /// Suffix after the result count.
    pub results_found: &'static str,
    /// No results heading.
    pub no_results: &'static str,
    /// No results hint.
    pub no_results_hint: &'static str,
    /// Search request failed.
    pub search_failed: &'static str,

    /// Favorites view title.
    pub favorites_title: &'static str,
    /// Suffix after the favorites count.
    pub favorites_count: &'static str,
    /// Empty list heading.
    pub favorites_empty_title: &'static str,
    /// Empty list hint.
    pub favorites_empty_hint: &'static str,
    /// Empty list action.
    pub discover_movies: &'static str,
    /// Clear-all action.
    pub clear_all: &'static str,
    /// Clear-all confirmation prompt.
    pub confirm_clear: &'static str,
    /// Favorites storage tip.
    pub favorites_tip: &'static str,
    /// Saving favorites failed.
    pub favorites_save_failed: &'static str,
    /// Added to favorites.
    pub favorite_added: &'static str,
    /// Removed from favorites.
    pub favorite_removed: &'static str,
    /// Movie is not in favorites.
    pub not_in_list: &'static str,

    /// Header box showing the current route.
    pub route_label: &'static str,
    /// Home row that loaded with no movies.
    pub row_empty: &'static str,
    /// Crew label in the cast section.
    pub director: &'static str,
    /// Favorites filter box title.
    pub filter_label: &'static str,
    /// Word before "current/total" page numbers.
    pub page_label: &'static str,
    /// Poster image link label.
    pub poster_label: &'static str,
    /// Backdrop image link label.
    pub backdrop_label: &'static str,
    /// Suffix after a result count of one.
    pub result_found: &'static str,

    /// Key hints on the home view.
    pub hints_home: &'static str,
    /// Key hints on the search results.
    pub hints_search: &'static str,
    /// Key hints on the detail view.
    pub hints_detail: &'static str,
    /// Key hints on the favorites view.
    pub hints_favorites: &'static str,
    /// Key hints while typing a search.
    pub hints_search_editing: &'static str,
    /// Key hints while typing a favorites filter.
    pub hints_filter_editing: &'static str,
}

impl Messages {
    /// Formats "`n` results found", singular for one.
    #[must_use]
    pub fn results_found(&self, count: u32) -> String {
        let suffix = if count == 1 {
            self.result_found
        } else {
            self.results_found
        };
        format!("{count} {suffix}")
    }

    /// Formats "`n` in favorites".
    #[must_use]
    pub fn favorites_count(&self, count: usize) -> String {
        format!("{count} {}", self.favorites_count)
    }
}

static EN: Messages = Messages {
    nav_home: "Home",
    nav_search: "Search",
    nav_favorites: "My List",
    row_trending: "Trending",
    row_now_playing: "Now Playing",
    row_popular: "Popular",
    row_top_rated: "Top Rated",
    row_upcoming: "Upcoming",
    loading: "Loading...",
    list_load_failed: "Could not load movies.",
    detail_load_failed: "An error occurred while loading movie details.",
    movie_not_found: "Movie not found",
    back_to_home: "Back to home",
    overview_heading: "Overview",
    no_overview: "No description available.",
    genres_heading: "Genres",
    info_heading: "Movie Info",
    original_title: "Original Title",
    status: "Status",
    original_language: "Original Language",
    production_companies: "Production Companies",
    cast_heading: "Cast",
    trailer_heading: "Trailer",
    no_trailer: "No trailer available.",
    reviews_heading: "Reviews",
    no_reviews: "No reviews yet.",
    similar_heading: "Similar Movies",
    add_to_list: "Add to My List",
    in_list: "In My List",
    not_available: "N/A",
    hour_suffix: "h",
    minute_suffix: "m",
    search_title: "Search Movies",
    search_placeholder: "Type a movie title...",
    search_start_title: "Start searching",
    search_start_hint: "Type a movie title in the search box above.",
    results_found: "results found",
    no_results: "No results found",
    no_results_hint: "Try different keywords.",
    search_failed: "Search failed.",
    favorites_title: "My List",
    favorites_count: "in favorites",
    favorites_empty_title: "Your list is empty",
    favorites_empty_hint: "Press f on any movie to build your personal collection.",
    discover_movies: "Discover Movies",
    clear_all: "Clear All",
    confirm_clear: "Remove all favorites? (y/n)",
    favorites_tip: "Favorites are stored on this device. Deleting the data directory removes them.",
    favorites_save_failed: "Could not save favorites.",
    favorite_added: "Added to My List",
    favorite_removed: "Removed from My List",
    not_in_list: "Not in My List",
    route_label: "Route",
    row_empty: "No movies to show.",
    director: "Director",
    filter_label: "Filter (/)",
    page_label: "page",
    poster_label: "Poster",
    backdrop_label: "Backdrop",
    result_found: "result found",
    hints_home: "j/k: row  h/l: movie  Enter: open  f: favorite  o: poster  s: search  v: my list  r: reload  q: quit",
    hints_search: "j/k: move  Enter: open  /: edit  f: favorite  o: poster  Esc: back  q: quit",
    hints_detail: "f: favorite  o: trailer  j/k: similar  Enter: open  r: reload  g: home  Esc: back  q: quit",
    hints_favorites: "j/k: move  Enter: open  /: filter  d: remove  c: clear all  Esc: back  q: quit",
    hints_search_editing: "type: search  Enter: search now  Esc: done",
    hints_filter_editing: "type: filter  Enter: done  Esc: clear",
};

static TR: Messages = Messages {
    nav_home: "Ana Sayfa",
    nav_search: "Ara",
    nav_favorites: "Listem",
    row_trending: "Trend Filmler",
    row_now_playing: "Şimdi Vizyonda",
    row_popular: "Popüler Filmler",
    row_top_rated: "En Yüksek Puanlılar",
    row_upcoming: "Yakında",
    loading: "Yükleniyor...",
    list_load_failed: "Filmler yüklenemedi.",
    detail_load_failed: "Film bilgileri yüklenirken bir hata oluştu.",
    movie_not_found: "Film bulunamadı",
    back_to_home: "Ana Sayfaya Dön",
    overview_heading: "Hikaye",
    no_overview: "Açıklama mevcut değil.",
    genres_heading: "Türler",
    info_heading: "Film Bilgileri",
    original_title: "Orijinal İsim",
    status: "Durum",
    original_language: "Orijinal Dil",
    production_companies: "Yapım Şirketleri",
    cast_heading: "Oyuncular",
    trailer_heading: "Fragman",
    no_trailer: "Fragman bulunamadı.",
    reviews_heading: "Yorumlar",
    no_reviews: "Henüz yorum yok.",
    similar_heading: "Benzer Filmler",
    add_to_list: "Listeme Ekle",
    in_list: "Listemde",
    not_available: "N/A",
    hour_suffix: "s",
    minute_suffix: "d",
    search_title: "Film Ara",
    search_placeholder: "Film adı yazın...",
    search_start_title: "Film Aramaya Başlayın",
    search_start_hint: "Yukarıdaki arama kutusuna film adı yazın.",
    results_found: "sonuç bulundu",
    no_results: "Sonuç bulunamadı",
    no_results_hint: "Farklı anahtar kelimeler deneyin.",
    search_failed: "Arama başarısız oldu.",
    favorites_title: "Listem",
    favorites_count: "Favorilerde",
    favorites_empty_title: "Favori Listeniz Boş",
    favorites_empty_hint: "Beğendiğiniz filmlerde f tuşuna basarak kişisel bir koleksiyon oluşturun.",
    discover_movies: "Filmleri Keşfet",
    clear_all: "Tümünü Temizle",
    confirm_clear: "Tüm favorileri silmek istediğinize emin misiniz? (y/n)",
    favorites_tip: "Favorileriniz cihazınızda saklanır. Veri dizinini silerseniz favorileriniz silinecektir.",
    favorites_save_failed: "Favoriler kaydedilemedi.",
    favorite_added: "Listeye eklendi",
    favorite_removed: "Listeden çıkarıldı",
    not_in_list: "Listemde değil",
    route_label: "Konum",
    row_empty: "Gösterilecek film yok.",
    director: "Yönetmen",
    filter_label: "Filtre (/)",
    page_label: "sayfa",
    poster_label: "Afiş",
    backdrop_label: "Arka Plan",
    result_found: "sonuç bulundu",
    hints_home: "j/k: satır  h/l: film  Enter: aç  f: favori  o: afiş  s: ara  v: listem  r: yenile  q: çıkış",
    hints_search: "j/k: gezin  Enter: aç  /: düzenle  f: favori  o: afiş  Esc: geri  q: çıkış",
    hints_detail: "f: favori  o: fragman  j/k: benzer  Enter: aç  r: yenile  g: ana sayfa  Esc: geri  q: çıkış",
    hints_favorites: "j/k: gezin  Enter: aç  /: filtre  d: kaldır  c: tümünü temizle  Esc: geri  q: çıkış",
    hints_search_editing: "yazın: ara  Enter: hemen ara  Esc: bitti",
    hints_filter_editing: "yazın: filtrele  Enter: bitti  Esc: temizle",
};

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_locale_default_is_english() {
        assert_eq!(Locale::default(), Locale::En);
        assert_eq!(Locale::default().messages().nav_home, "Home");
    }

    #[test]
    fn test_turkish_table() {
        let m = Locale::Tr.messages();
        assert_eq!(m.movie_not_found, "Film bulunamadı");
        assert_eq!(m.results_found(3), "3 sonuç bulundu");
    }

    #[test]
    fn test_results_found_singular() {
        let m = Locale::En.messages();
        assert_eq!(m.results_found(1), "1 result found");
        assert_eq!(m.results_found(0), "0 results found");
        assert_eq!(m.results_found(12), "12 results found");
    }

    #[test]
    fn test_tables_share_key_hint_layout() {
        for locale in [Locale::En, Locale::Tr] {
            let m = locale.messages();
            for hints in [m.hints_home, m.hints_search, m.hints_detail, m.hints_favorites] {
                assert!(hints.contains("Enter:"), "{locale:?}: {hints}");
                assert!(hints.contains("q:"), "{locale:?}: {hints}");
            }
        }
    }

    #[test]
    fn test_locale_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            locale: Locale,
        }
        let parsed: Wrapper = toml::from_str("locale = \"tr\"").unwrap();
        assert_eq!(parsed.locale, Locale::Tr);
    }
}
