//! Cross-layer behaviour: frames built by one layer and consumed through the core

use crate::arp::ArpLayer;
use crate::checksum;
use crate::ethernet::{EthField, EthernetLayer, HEADER_SIZE};
use crate::ip::Ipv4Layer;
use crate::layer::Layer;
use crate::pause::PauseLayer;
use crate::qinq::insert_qinq;
use rawframes_core::{ArpOp, Error, EtherType, Ipv4Proto, MacAddress};

const HOST_A: MacAddress = MacAddress::new([0x02, 0x00, 0x5e, 0x10, 0x00, 0x01]);
const HOST_B: MacAddress = MacAddress::new([0x02, 0x00, 0x5e, 0x10, 0x00, 0x02]);

#[test]
fn test_ethernet_vector_round_trips_through_core() {
    let mut eth = EthernetLayer::new();
    eth.set_dmac([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]).unwrap();
    eth.set_smac([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]).unwrap();
    eth.set_ethertype(0x1005u16);
    eth.set_payload([0x01, 0x02]);
    eth.encapsulate().unwrap();

    let expected = vec![
        0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x10, 0x05, 0x01,
        0x02,
    ];

    let walked: Vec<u8> = eth.core_mut().bytes().collect();
    assert_eq!(walked, expected);
    assert!(!eth.core().is_valid());

    // A fresh encapsulation refills the frame and the cursor starts over
    eth.encapsulate().unwrap();
    assert_eq!(eth.core_mut().next_byte(), Some(0xAA));
    assert_eq!(eth.core_mut().take(), expected);
    assert!(eth.core_mut().take().is_empty());
}

#[test]
fn test_iterator_yields_exactly_frame_length() {
    let mut pause = PauseLayer::new();
    pause.ethernet_mut().set_smac(HOST_A).unwrap();
    pause.encapsulate().unwrap();

    let core = pause.core_mut();
    let length = core.len();
    let mut count = 0;
    while core.next_byte().is_some() {
        count += 1;
    }

    assert_eq!(count, length);
    assert!(!core.is_valid());
    assert_eq!(core.next_byte(), None);
}

#[test]
fn test_ipv4_header_checksum_verifies_on_wire() {
    let mut ip = Ipv4Layer::new();
    ip.set_proto(Ipv4Proto::Tcp);
    ip.set_sip([172, 16, 0, 10]).unwrap();
    ip.set_dip([172, 16, 0, 20]).unwrap();
    ip.set_payload(vec![0x5a; 33]);
    ip.ethernet_mut().set_dmac(HOST_B).unwrap();
    ip.ethernet_mut().set_smac(HOST_A).unwrap();
    ip.encapsulate().unwrap();

    let frame = ip.core_mut().take();
    let header = &frame[HEADER_SIZE..HEADER_SIZE + 20];
    assert_eq!(checksum::accumulate(header), 0xFFFF);
    assert_eq!(u16::from_be_bytes([header[10], header[11]]), ip.checksum());
}

#[test]
fn test_arp_request_with_unset_target_mac() {
    let mut arp = ArpLayer::new();
    arp.set_op(ArpOp::Request);
    arp.set_qmac(HOST_A).unwrap();
    arp.set_qip([192, 168, 7, 1]).unwrap();
    arp.set_tip([192, 168, 7, 2]).unwrap();
    arp.encapsulate().unwrap();

    let frame = arp.core_mut().take();
    assert_eq!(frame.len(), HEADER_SIZE + 46);
    assert_eq!(&frame[0..6], MacAddress::BROADCAST.as_bytes());
    assert_eq!(&frame[6..12], HOST_A.as_bytes());

    let body = &frame[HEADER_SIZE..HEADER_SIZE + 28];
    assert_eq!(&body[18..24], &[0u8; 6]);
    assert_eq!(&body[24..28], &[192, 168, 7, 2]);
}

#[test]
fn test_width_rejection_leaves_layers_unchanged() {
    let mut arp = ArpLayer::new();
    let before = arp.describe();

    assert!(matches!(
        arp.set_tmac([1, 2, 3, 4, 5]),
        Err(Error::InvalidFieldWidth { actual: 5, .. })
    ));
    assert!(arp.ethernet_mut().set_smac([1, 2, 3, 4, 5]).is_err());
    assert!(arp.ethernet_mut().insert([0x88], [0x00]).is_err());

    assert_eq!(arp.describe(), before);
}

#[test]
fn test_payload_setters_append_across_layers() {
    let mut ip = Ipv4Layer::new();
    ip.set_payload([1, 2, 3]);
    ip.set_payload([4, 5, 6, 7]);
    assert_eq!(ip.field(crate::ip::Ipv4Field::Payload).len(), 7);

    let mut eth = EthernetLayer::new();
    eth.set_dmac(HOST_A).unwrap();
    eth.set_dmac(HOST_B).unwrap();
    assert_eq!(eth.field(EthField::Dmac).len(), 12);
}

#[test]
fn test_qinq_arp_reply_with_arp_ethertype() {
    let mut arp = ArpLayer::new().with_link_ethertype(EtherType::Arp);
    arp.set_op(ArpOp::Reply);
    arp.set_qmac(HOST_A).unwrap();
    arp.set_qip([10, 1, 1, 1]).unwrap();
    arp.set_tmac(HOST_B).unwrap();
    arp.set_tip([10, 1, 1, 2]).unwrap();
    insert_qinq(&mut arp, 0x0064).unwrap();
    arp.encapsulate().unwrap();

    let frame = arp.core().as_bytes();
    assert_eq!(&frame[0..6], HOST_A.as_bytes());
    assert_eq!(&frame[6..12], HOST_B.as_bytes());
    assert_eq!(&frame[12..18], &[0x88, 0xa8, 0x00, 0x64, 0x08, 0x06]);
    assert_eq!(frame.len(), HEADER_SIZE + 4 + 46);
}

#[test]
fn test_pause_dump_snapshot() {
    let mut pause = PauseLayer::new();
    pause.set_quanta(2);
    pause.ethernet_mut().set_smac(HOST_A).unwrap();

    assert_eq!(
        pause.describe(),
        "{quanta:0x0002,frame:{spec:\
         DMAC:{valid:false,bytes:{empty}},\
         SMAC:{valid:true,bytes:{0x02,0x00,0x5e,0x10,0x00,0x01}},\
         ETHERTYPE:{valid:false,bytes:{empty}},\
         PAYLOAD:{valid:false,bytes:{empty}},\
         frame:{frame:{valid:false,bytes:{empty}}}}}"
    );
}

#[test]
fn test_layers_as_trait_objects() {
    let mut pause = PauseLayer::new();
    pause.ethernet_mut().set_smac(HOST_A).unwrap();
    let mut eth = EthernetLayer::new();
    eth.set_dmac(HOST_B).unwrap();
    eth.set_smac(HOST_A).unwrap();
    eth.set_ethertype(EtherType::Reserved);
    eth.set_payload([0u8; 46]);

    let mut layers: Vec<Box<dyn Layer>> = vec![Box::new(pause), Box::new(eth)];
    for layer in layers.iter_mut() {
        layer.encapsulate().unwrap();
        assert_eq!(layer.core().len(), 60);
    }
}
