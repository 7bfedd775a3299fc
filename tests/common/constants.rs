// Song metadata files, one object per file
pub const SONG_A_JSON: &str = r#"{"num_songs": 1, "artist_id": "AR1", "artist_latitude": 40.7, "artist_longitude": -74.0, "artist_location": "New York, NY", "artist_name": "Artist A", "song_id": "S1", "title": "Song A", "duration": 210.5, "year": 2000}"#;
pub const SONG_B_JSON: &str = r#"{"num_songs": 1, "artist_id": "AR2", "artist_latitude": null, "artist_longitude": null, "artist_location": "", "artist_name": "Artist B", "song_id": "S2", "title": "Song B", "duration": 180.0, "year": 0}"#;

// Log lines
pub const PLAY_SONG_A_LINE: &str = r#"{"artist":"Artist A","auth":"Logged In","firstName":"Ada","gender":"F","itemInSession":0,"lastName":"Lovelace","length":210.5,"level":"free","location":"London","method":"PUT","page":"NextSong","registration":1540919166796.0,"sessionId":583,"song":"Song A","status":200,"ts":1541990258796,"userAgent":"Mozilla/5.0","userId":"10"}"#;
pub const HOME_LINE: &str = r#"{"artist":null,"auth":"Logged In","firstName":"Ada","gender":"F","itemInSession":1,"lastName":"Lovelace","length":null,"level":"free","location":"London","method":"GET","page":"Home","registration":1540919166796.0,"sessionId":583,"song":null,"status":200,"ts":1541990264796,"userAgent":"Mozilla/5.0","userId":"10"}"#;
pub const PLAY_UNKNOWN_SONG_LINE: &str = r#"{"artist":"Nobody","auth":"Logged In","firstName":"Ada","gender":"F","itemInSession":2,"lastName":"Lovelace","length":99.9,"level":"paid","location":"London","method":"PUT","page":"NextSong","registration":1540919166796.0,"sessionId":583,"song":"Unknown","status":200,"ts":1541990470796,"userAgent":"Mozilla/5.0","userId":"10"}"#;

pub const SONG_A_ID: &str = "S1";
pub const ARTIST_A_ID: &str = "AR1";
pub const USER_ID: &str = "10";
