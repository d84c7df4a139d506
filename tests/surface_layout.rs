use surface_stride::demo::{mark, MarkTarget};
use surface_stride::surface::align4;
use surface_stride::{ByteLocation, Error, LengthModel, PixelFormat, Surface, SurfaceLayout};

const MAX_DIM: usize = 40;

fn layouts() -> impl Iterator<Item = SurfaceLayout> {
    (1..=4usize).flat_map(|bpp| {
        (1..=MAX_DIM).flat_map(move |w| (1..=8usize).filter_map(move |h| SurfaceLayout::new(w, h, bpp)))
    })
}

#[test]
fn pitch_is_aligned_and_covers_row() {
    for layout in layouts() {
        assert!(layout.pitch >= layout.width * layout.bytes_per_pixel);
        assert_eq!(layout.pitch % 4, 0);
        assert!(layout.pitch - layout.row_bytes() < 4, "{layout:?}");
    }
}

#[test]
fn pitch_equals_row_bytes_iff_row_is_aligned() {
    for layout in layouts() {
        let row = layout.width * layout.bytes_per_pixel;
        assert_eq!(layout.pitch == row, row % 4 == 0, "{layout:?}");
        assert_eq!(layout.has_padding(), row % 4 != 0);
    }
}

#[test]
fn naive_length_never_exceeds_true_length() {
    for layout in layouts() {
        assert_eq!(layout.true_len(), layout.pitch * layout.height);
        assert_eq!(
            layout.naive_len(),
            layout.width * layout.height * layout.bytes_per_pixel
        );
        assert!(layout.naive_len() <= layout.true_len());
        assert_eq!(
            layout.naive_len() == layout.true_len(),
            !layout.has_padding(),
            "{layout:?}"
        );
    }
}

#[test]
fn last_pixel_offset_always_resolves_to_last_pixel() {
    for layout in layouts() {
        let offset = layout.offset_of(
            layout.height - 1,
            layout.width - 1,
            layout.bytes_per_pixel - 1,
        );
        assert_eq!(layout.locate(offset), layout.last_pixel_location());

        let last = layout.locate(layout.true_len() - 1);
        if layout.has_padding() {
            assert!(matches!(last, ByteLocation::Padding { row, .. } if row == layout.height - 1));
        } else {
            assert_eq!(last, layout.last_pixel_location());
        }
    }
}

#[test]
fn naive_last_offset_lands_early_when_padded() {
    // a single row has nowhere to drift
    for layout in layouts().filter(|l| l.has_padding() && l.height > 1) {
        let naive_last = layout.naive_len() - 1;
        let true_last = layout.offset_of(
            layout.height - 1,
            layout.width - 1,
            layout.bytes_per_pixel - 1,
        );
        assert!(naive_last < true_last, "{layout:?}");
        assert_ne!(layout.locate(naive_last), layout.last_pixel_location());
    }

    let legacy = SurfaceLayout::new(31, 24, 3).unwrap();
    assert_eq!(legacy.pitch, 96);
    assert_eq!(legacy.naive_len() - 1, 2231);
    assert_eq!(
        legacy.locate(2231),
        ByteLocation::Pixel {
            row: 23,
            column: 7,
            channel: 2
        }
    );
}

#[test]
fn double_release_is_harmless() {
    let mut surface = Surface::create(31, 24, 24, PixelFormat::Rgb24).unwrap();
    assert!(surface.release());
    assert!(!surface.release());
    assert_eq!(surface.pixels().unwrap_err(), Error::UseAfterFree);
    assert_eq!(surface.get_byte(0), Err(Error::UseAfterFree));
    assert_eq!(surface.pixel_rgb(0, 0), Err(Error::UseAfterFree));
}

#[test]
fn mismatched_depth_is_a_format_error() {
    assert_eq!(
        Surface::create(31, 24, 24, PixelFormat::Argb8888).unwrap_err(),
        Error::Format {
            format: PixelFormat::Argb8888,
            bits_per_pixel: 24
        }
    );
    for format in PixelFormat::ALL {
        for bits in [8, 16, 24, 32] {
            let created = Surface::create(3, 3, bits, format);
            assert_eq!(created.is_ok(), bits == format.bits_per_pixel(), "{format} {bits}");
        }
    }
}

#[test]
fn created_surface_matches_layout_arithmetic() {
    for format in PixelFormat::ALL {
        for width in 1..=9u32 {
            let surface = Surface::create(width, 5, format.bits_per_pixel(), format).unwrap();
            assert_eq!(surface.pitch(), align4(width as usize * format.bytes_per_pixel()));
            assert_eq!(surface.true_len().unwrap(), surface.pitch() * 5);
        }
    }
}

#[test]
fn legacy_demo_marks_column_7() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut surface = Surface::create(31, 24, 24, PixelFormat::Rgb24).unwrap();
    surface.set_length_model(LengthModel::Naive);
    let report = mark(&mut surface, MarkTarget::LastByte, 0xff).unwrap();
    log::info!("{report}");
    assert!(!report.landed_on_intended());
    assert_eq!(surface.pixel_rgb(7, 23).unwrap(), [0, 0, 0xff]);
}
