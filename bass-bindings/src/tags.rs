//! Tag blocks returned by BASS_ChannelGetTags, decoded into owned values.
//!
//! Native tag memory belongs to the channel and is only valid until the
//! next call on it, so [`read`] copies everything before returning.

use std::ffi::{c_char, CStr};

use crate::api::BassApi;
use crate::ffi::*;

const _: () = assert!(std::mem::size_of::<TagId3>() == 128);
const _: () = assert!(std::mem::size_of::<TagBext>() == 602);
const _: () = assert!(std::mem::size_of::<TagCart>() == 2048);

/// Which tag block to ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    Id3,
    Id3v2,
    Ogg,
    Http,
    Icy,
    Meta,
    Ape,
    Mp4,
    Wma,
    Vendor,
    Lyrics3,
    RiffInfo,
    RiffBext,
    RiffCart,
    RiffDisp,
    MusicName,
    MusicMessage,
}

enum Layout {
    Id3,
    Id3v2,
    Bext,
    Cart,
    List,
    Text,
}

impl TagType {
    pub fn raw(self) -> DWORD {
        match self {
            TagType::Id3 => BASS_TAG_ID3,
            TagType::Id3v2 => BASS_TAG_ID3V2,
            TagType::Ogg => BASS_TAG_OGG,
            TagType::Http => BASS_TAG_HTTP,
            TagType::Icy => BASS_TAG_ICY,
            TagType::Meta => BASS_TAG_META,
            TagType::Ape => BASS_TAG_APE,
            TagType::Mp4 => BASS_TAG_MP4,
            TagType::Wma => BASS_TAG_WMA,
            TagType::Vendor => BASS_TAG_VENDOR,
            TagType::Lyrics3 => BASS_TAG_LYRICS3,
            TagType::RiffInfo => BASS_TAG_RIFF_INFO,
            TagType::RiffBext => BASS_TAG_RIFF_BEXT,
            TagType::RiffCart => BASS_TAG_RIFF_CART,
            TagType::RiffDisp => BASS_TAG_RIFF_DISP,
            TagType::MusicName => BASS_TAG_MUSIC_NAME,
            TagType::MusicMessage => BASS_TAG_MUSIC_MESSAGE,
        }
    }

    fn layout(self) -> Layout {
        match self {
            TagType::Id3 => Layout::Id3,
            TagType::Id3v2 => Layout::Id3v2,
            TagType::RiffBext => Layout::Bext,
            TagType::RiffCart => Layout::Cart,
            TagType::Ogg
            | TagType::Http
            | TagType::Icy
            | TagType::Ape
            | TagType::Mp4
            | TagType::Wma
            | TagType::RiffInfo => Layout::List,
            TagType::Meta
            | TagType::Vendor
            | TagType::Lyrics3
            | TagType::RiffDisp
            | TagType::MusicName
            | TagType::MusicMessage => Layout::Text,
        }
    }
}

/// A decoded tag block
#[derive(Debug, Clone, PartialEq)]
pub enum Tags {
    Id3(Id3Tag),
    /// Raw ID3v2 block, header included
    Id3v2(Vec<u8>),
    Bext(BextTag),
    Cart(CartTag),
    /// Entries of a double-NUL terminated list
    List(Vec<String>),
    Text(String),
}

impl Tags {
    /// Value of `key` in a list of `KEY=value` or `Key: value` entries,
    /// compared case-insensitively.
    pub fn value(&self, key: &str) -> Option<&str> {
        let Tags::List(entries) = self else {
            return None;
        };
        entries.iter().find_map(|entry| {
            let (k, v) = entry.split_once('=').or_else(|| entry.split_once(':'))?;
            k.trim().eq_ignore_ascii_case(key).then(|| v.trim())
        })
    }
}

// ============================================================================
// Fixed layouts
// ============================================================================

/// ID3v1 / ID3v1.1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id3Tag {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub comment: String,
    /// ID3v1.1 track number
    pub track: Option<u8>,
    pub genre: u8,
}

impl Id3Tag {
    /// Decode a 128-byte block starting with `TAG`.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < std::mem::size_of::<TagId3>() {
            return None;
        }
        let raw = unsafe { std::ptr::read_unaligned(bytes.as_ptr() as *const TagId3) };
        if &raw.id != b"TAG" {
            return None;
        }
        let v11 = raw.comment[28] == 0 && raw.comment[29] != 0;
        let comment = if v11 { &raw.comment[..28] } else { &raw.comment[..] };
        Some(Self {
            title: latin1(&raw.title),
            artist: latin1(&raw.artist),
            album: latin1(&raw.album),
            year: latin1(&raw.year),
            comment: latin1(comment),
            track: v11.then_some(raw.comment[29]),
            genre: raw.genre,
        })
    }
}

/// Broadcast Wave `bext` chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BextTag {
    pub description: String,
    pub originator: String,
    pub originator_reference: String,
    pub origination_date: String,
    pub origination_time: String,
    /// Sample count since midnight
    pub time_reference: u64,
    pub version: u16,
    pub umid: Vec<u8>,
    pub coding_history: String,
}

impl BextTag {
    /// Decode the fixed part plus the trailing coding history.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let fixed = std::mem::size_of::<TagBext>();
        if bytes.len() < fixed {
            return None;
        }
        let raw = unsafe { std::ptr::read_unaligned(bytes.as_ptr() as *const TagBext) };
        Some(Self {
            description: latin1(&raw.description),
            originator: latin1(&raw.originator),
            originator_reference: latin1(&raw.originator_reference),
            origination_date: latin1(&raw.origination_date),
            origination_time: latin1(&raw.origination_time),
            time_reference: { raw.time_reference },
            version: { raw.version },
            umid: raw.umid.to_vec(),
            coding_history: latin1(&bytes[fixed..]),
        })
    }
}

/// Post timer entry of a `cart` chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTimer {
    /// FOURCC usage code, e.g. `SEGs`
    pub usage: String,
    pub value: u32,
}

/// Broadcast Wave `cart` chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTag {
    pub version: String,
    pub title: String,
    pub artist: String,
    pub cut_id: String,
    pub client_id: String,
    pub category: String,
    pub classification: String,
    pub out_cue: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub producer_app_id: String,
    pub producer_app_version: String,
    pub user_def: String,
    pub level_reference: u32,
    pub post_timers: Vec<CartTimer>,
    pub url: String,
    pub tag_text: String,
}

impl CartTag {
    /// Decode the fixed part plus the trailing tag text.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let fixed = std::mem::size_of::<TagCart>();
        if bytes.len() < fixed {
            return None;
        }
        let raw = unsafe { std::ptr::read_unaligned(bytes.as_ptr() as *const TagCart) };
        let post_timers = raw
            .post_timer
            .iter()
            .filter_map(|t| {
                let (usage, value) = (t.usage, t.value);
                (usage != 0).then(|| CartTimer {
                    usage: latin1(&usage.to_le_bytes()),
                    value,
                })
            })
            .collect();
        Some(Self {
            version: latin1(&raw.version),
            title: latin1(&raw.title),
            artist: latin1(&raw.artist),
            cut_id: latin1(&raw.cut_id),
            client_id: latin1(&raw.client_id),
            category: latin1(&raw.category),
            classification: latin1(&raw.classification),
            out_cue: latin1(&raw.out_cue),
            start_date: latin1(&raw.start_date),
            start_time: latin1(&raw.start_time),
            end_date: latin1(&raw.end_date),
            end_time: latin1(&raw.end_time),
            producer_app_id: latin1(&raw.producer_app_id),
            producer_app_version: latin1(&raw.producer_app_version),
            user_def: latin1(&raw.user_def),
            level_reference: { raw.level_reference },
            post_timers,
            url: latin1(&raw.url),
            tag_text: latin1(&bytes[fixed..]),
        })
    }
}

/// Fixed-width text field: up to the first NUL, trailing spaces trimmed.
fn latin1(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    let text: String = field[..end].iter().map(|&b| b as char).collect();
    text.trim_end().to_string()
}

/// Split a double-NUL terminated list.
pub fn parse_string_list(bytes: &[u8]) -> Vec<String> {
    bytes
        .split(|&b| b == 0)
        .take_while(|entry| !entry.is_empty())
        .map(|entry| String::from_utf8_lossy(entry).into_owned())
        .collect()
}

// ============================================================================
// Reading native memory
// ============================================================================

/// Read and decode the `tag_type` block of `handle`.
pub(crate) fn read(api: &dyn BassApi, handle: DWORD, tag_type: TagType) -> Option<Tags> {
    let ptr = api.channel_tags(handle, tag_type.raw());
    if ptr.is_null() {
        return None;
    }
    unsafe { decode(ptr, tag_type) }
}

/// # Safety
/// `ptr` must point to a tag block of the layout `tag_type` names.
unsafe fn decode(ptr: *const c_char, tag_type: TagType) -> Option<Tags> {
    let bytes = ptr as *const u8;
    match tag_type.layout() {
        Layout::Id3 => Id3Tag::parse(std::slice::from_raw_parts(bytes, 128)).map(Tags::Id3),
        Layout::Id3v2 => {
            let header = std::slice::from_raw_parts(bytes, 10);
            let len = id3v2_len(header)?;
            Some(Tags::Id3v2(std::slice::from_raw_parts(bytes, len).to_vec()))
        }
        Layout::Bext => {
            let fixed = std::mem::size_of::<TagBext>();
            let tail = CStr::from_ptr(ptr.add(fixed)).to_bytes().len();
            BextTag::parse(std::slice::from_raw_parts(bytes, fixed + tail)).map(Tags::Bext)
        }
        Layout::Cart => {
            let fixed = std::mem::size_of::<TagCart>();
            let tail = CStr::from_ptr(ptr.add(fixed)).to_bytes().len();
            CartTag::parse(std::slice::from_raw_parts(bytes, fixed + tail)).map(Tags::Cart)
        }
        Layout::List => Some(Tags::List(read_string_list(ptr))),
        Layout::Text => Some(Tags::Text(CStr::from_ptr(ptr).to_string_lossy().into_owned())),
    }
}

/// Total ID3v2 size from its 10-byte header (syncsafe size plus optional footer).
fn id3v2_len(header: &[u8]) -> Option<usize> {
    if header.len() < 10 || &header[..3] != b"ID3" {
        return None;
    }
    let size = header[6..10]
        .iter()
        .fold(0usize, |acc, &b| (acc << 7) | (b & 0x7f) as usize);
    let footer = if header[5] & 0x10 != 0 { 10 } else { 0 };
    Some(10 + size + footer)
}

/// # Safety
/// `ptr` must point to a double-NUL terminated list.
pub(crate) unsafe fn read_string_list(ptr: *const c_char) -> Vec<String> {
    let mut entries = Vec::new();
    let mut cursor = ptr;
    loop {
        let entry = CStr::from_ptr(cursor);
        let len = entry.to_bytes().len();
        if len == 0 {
            break;
        }
        entries.push(entry.to_string_lossy().into_owned());
        cursor = cursor.add(len + 1);
    }
    entries
}
