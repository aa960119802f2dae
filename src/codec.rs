//! CSV interchange format for tracks.
//!
//! The codec writes any non-empty, ordered subset of the track columns and
//! reads back whatever subset a file carries, as long as `id` and `title` are
//! present. Writing a set of tracks and reading the file again reproduces every
//! written column exactly; columns that were left out come back as their
//! defaults (empty string, empty artist list, absent duration).
//!
//! Plain-text listings ([`ExportFormat::Simple`], [`ExportFormat::Detailed`]
//! and [`ExportFormat::Ids`]) are write-only.
//!
//! The `artists` column joins names with `", "` and is split on commas when
//! read, so an artist name that itself contains a comma does not survive a
//! round trip.

use std::{
    collections::HashMap,
    fs::{self, File},
    io::{self, Read, Write},
    path::Path,
};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::{
    error::ExtractorError,
    types::{ExportFormat, Track, TrackField},
    utils,
};

/// Writes `tracks` to `path` using `fields` (default: all columns in canonical order).
///
/// An empty track list truncates the file to zero bytes; no header is written.
///
/// # Errors
///
/// - `InvalidFormat` when `fields` is an empty slice
/// - `Io`/`Csv` when the file cannot be written
pub fn write_tracks<P: AsRef<Path>>(
    tracks: &[Track],
    path: P,
    fields: Option<&[TrackField]>,
) -> Result<(), ExtractorError> {
    check_fields(fields)?;
    let file = File::create(path.as_ref())?;
    write_tracks_to(tracks, file, fields)
}

pub fn write_tracks_to<W: Write>(
    tracks: &[Track],
    writer: W,
    fields: Option<&[TrackField]>,
) -> Result<(), ExtractorError> {
    check_fields(fields)?;
    let fields = fields.unwrap_or(&TrackField::ALL);

    if tracks.is_empty() {
        return Ok(());
    }

    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(fields.iter().map(TrackField::as_str))?;

    for track in tracks {
        wtr.write_record(fields.iter().map(|field| field_value(track, *field)))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `tracks` to `path` in `format`.
///
/// [`ExportFormat::Csv`] writes every column; use [`write_tracks`] to pick a
/// subset.
pub fn write_text_tracks<P: AsRef<Path>>(
    tracks: &[Track],
    path: P,
    format: ExportFormat,
) -> Result<(), ExtractorError> {
    let file = File::create(path.as_ref())?;
    write_text_tracks_to(tracks, file, format)
}

pub fn write_text_tracks_to<W: Write>(
    tracks: &[Track],
    mut writer: W,
    format: ExportFormat,
) -> Result<(), ExtractorError> {
    match format {
        ExportFormat::Csv => return write_tracks_to(tracks, writer, None),
        ExportFormat::Simple => {
            for (i, track) in tracks.iter().enumerate() {
                writeln!(
                    writer,
                    "{}. [{}] {} - {}",
                    i + 1,
                    track.id,
                    track.title,
                    utils::join_artists(&track.artists)
                )?;
            }
        }
        ExportFormat::Detailed => {
            for (i, track) in tracks.iter().enumerate() {
                writeln!(writer, "Track #{}", i + 1)?;
                writeln!(writer, "ID: {}", track.id)?;
                writeln!(writer, "Title: {}", track.title)?;
                writeln!(writer, "Artist(s): {}", utils::join_artists(&track.artists))?;
                writeln!(writer, "Album: {}", track.album)?;
                writeln!(writer, "Duration: {}", utils::format_duration(track.duration))?;
                writeln!(writer, "{}", "-".repeat(40))?;
            }
        }
        ExportFormat::Ids => {
            for track in tracks {
                writeln!(writer, "{}", track.id)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

fn check_fields(fields: Option<&[TrackField]>) -> Result<(), ExtractorError> {
    match fields {
        Some([]) => Err(ExtractorError::InvalidFormat(
            "at least one CSV field must be selected".to_string(),
        )),
        _ => Ok(()),
    }
}

fn field_value(track: &Track, field: TrackField) -> String {
    match field {
        TrackField::Id => track.id.to_string(),
        TrackField::Title => track.title.clone(),
        TrackField::Artists => utils::join_artists(&track.artists),
        TrackField::Album => track.album.clone(),
        TrackField::Duration => track.duration.map(|d| d.to_string()).unwrap_or_default(),
    }
}

/// Reads tracks from a CSV file previously produced by [`write_tracks`] (or by hand).
///
/// A zero-byte file reads as an empty list, matching what [`write_tracks`]
/// produces for no tracks.
///
/// # Errors
///
/// - `NotFound` when the file does not exist
/// - `InvalidFormat` when the header lacks `id` or `title`, or when an `id`
///   or `duration` cell is not an integer
pub fn read_tracks<P: AsRef<Path>>(path: P) -> Result<Vec<Track>, ExtractorError> {
    let path = path.as_ref();
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ExtractorError::NotFound(format!(
                "CSV file '{}' not found",
                path.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };

    read_tracks_from(file)
}

pub fn read_tracks_from<R: Read>(reader: R) -> Result<Vec<Track>, ExtractorError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?;
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim().to_string(), i))
        .collect();

    if !columns.contains_key("id") || !columns.contains_key("title") {
        return Err(ExtractorError::InvalidFormat(
            "CSV file must contain at least 'id' and 'title' columns".to_string(),
        ));
    }

    let mut tracks = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        // header is line 1
        tracks.push(parse_record(&record, &columns, row + 2)?);
    }

    Ok(tracks)
}

fn parse_record(
    record: &StringRecord,
    columns: &HashMap<String, usize>,
    line: usize,
) -> Result<Track, ExtractorError> {
    let raw_id = cell(record, columns, "id").unwrap_or_default().trim();
    let id = raw_id.parse::<u64>().map_err(|_| {
        ExtractorError::InvalidFormat(format!(
            "invalid value '{}' for field 'id' on line {}",
            raw_id, line
        ))
    })?;

    let duration = match cell(record, columns, "duration").map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(raw.parse::<u64>().map_err(|_| {
            ExtractorError::InvalidFormat(format!(
                "invalid value '{}' for field 'duration' on line {}",
                raw, line
            ))
        })?),
        _ => None,
    };

    Ok(Track {
        id,
        title: cell(record, columns, "title").unwrap_or_default().to_string(),
        artists: cell(record, columns, "artists")
            .map(utils::split_artists)
            .unwrap_or_default(),
        album: cell(record, columns, "album").unwrap_or_default().to_string(),
        duration,
    })
}

fn cell<'r>(
    record: &'r StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> Option<&'r str> {
    columns.get(name).and_then(|&i| record.get(i))
}
